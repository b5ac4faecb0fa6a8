use crate::declaration::TypeKey;
use crate::prelude::graphql::*;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// The schema facade.
///
/// Aggregates the root type declarations, the plugin chain, the lazily installed executor and
/// the conversion/registration maps. Both maps grow monotonically and are never pruned.
///
/// The maps are shard-guarded, so racing first-time resolution degrades to "first insert wins"
/// rather than undefined behavior, but the intended discipline is to warm the schema from a
/// single logical thread of control ([`Schema::setup`]) before sharing it for concurrent
/// read-only execution. No cancellation or timeout is provided at this layer.
pub struct Schema<E: Engine> {
    engine: E,
    name: String,
    query: Option<TypeRef<E>>,
    mutation: Option<TypeRef<E>>,
    subscription: Option<TypeRef<E>>,
    plugins: Vec<Box<dyn Plugin<E>>>,
    executor: OnceCell<Box<dyn Executor<E>>>,
    // Each entry pins its declaration: the allocation behind the identity key must stay live
    // for as long as the entry exists, or the key could be reissued to a new declaration.
    types: DashMap<TypeKey, (TypeRef<E>, E::InternalType)>,
    type_names: DashMap<String, Arc<dyn NamedTypeDecl<E>>>,
}

impl<E: Engine> Schema<E> {
    pub fn builder(engine: E) -> SchemaBuilder<E> {
        SchemaBuilder {
            engine,
            name: "Schema".to_string(),
            query: None,
            mutation: None,
            subscription: None,
            plugins: Vec::new(),
            executor: None,
            auto_camel_case: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn query(&self) -> Option<&TypeRef<E>> {
        self.query.as_ref()
    }

    pub fn mutation(&self) -> Option<&TypeRef<E>> {
        self.mutation.as_ref()
    }

    pub fn subscription(&self) -> Option<&TypeRef<E>> {
        self.subscription.as_ref()
    }

    pub fn set_query(&mut self, query: Option<TypeRef<E>>) {
        self.query = query;
    }

    pub fn set_mutation(&mut self, mutation: Option<TypeRef<E>>) {
        self.mutation = mutation;
    }

    pub fn set_subscription(&mut self, subscription: Option<TypeRef<E>>) {
        self.subscription = subscription;
    }

    /// Append a plugin to the chain, applying its schema contribution immediately.
    pub fn add_plugin(&mut self, mut plugin: Box<dyn Plugin<E>>) {
        tracing::debug!(plugin = plugin.name(), "adding plugin");
        plugin.contribute_to_schema(self);
        self.plugins.push(plugin);
    }

    /// Run a name through the plugin chain's naming transforms, left to right.
    pub fn default_namedtype_name(&self, name: &str) -> String {
        let mut value = name.to_string();
        for plugin in &self.plugins {
            if let Some(renamed) = plugin.default_namedtype_name(&value) {
                value = renamed;
            }
        }
        value
    }

    /// Convert a declared type into the engine's representation.
    ///
    /// Declarations are converted at most once per identity: repeated resolution returns clones
    /// of the one converted object, without re-invoking the declaration's factory. Named
    /// declarations are additionally registered under their type name on first conversion.
    /// Already-resolved values pass through untouched with no side effects.
    ///
    /// No map lock is held across a factory call, so factories may re-enter `resolve` for
    /// nested declarations.
    pub fn resolve(&self, decl: &TypeRef<E>) -> Result<E::InternalType, SchemaError> {
        match decl {
            TypeRef::Resolved(native) => Ok(native.clone()),
            TypeRef::Named(named) => {
                let key = TypeKey::identity(named);
                if let Some(cached) = self.types.get(&key) {
                    return Ok(cached.value().1.clone());
                }
                tracing::debug!(name = named.type_name(), "converting named type");
                let converted =
                    named
                        .internal_type(self)
                        .map_err(|source| SchemaError::Conversion {
                            name: named.type_name().to_string(),
                            source,
                        })?;
                self.register(named)?;
                // A nested resolution may have populated the entry in the meantime; the first
                // insertion wins so every caller observes the same converted object.
                let pinned = TypeRef::Named(Arc::clone(named));
                Ok(self
                    .types
                    .entry(key)
                    .or_insert((pinned, converted))
                    .value()
                    .1
                    .clone())
            }
            TypeRef::Inline(inline) => {
                let key = TypeKey::identity(inline);
                if let Some(cached) = self.types.get(&key) {
                    return Ok(cached.value().1.clone());
                }
                let converted =
                    inline
                        .internal_type(self)
                        .map_err(|source| SchemaError::Conversion {
                            name: "<inline>".to_string(),
                            source,
                        })?;
                let pinned = TypeRef::Inline(Arc::clone(inline));
                Ok(self
                    .types
                    .entry(key)
                    .or_insert((pinned, converted))
                    .value()
                    .1
                    .clone())
            }
        }
    }

    /// [`Schema::resolve`] lifted over optional declarations, for optional roots.
    pub fn resolve_optional(
        &self,
        decl: Option<&TypeRef<E>>,
    ) -> Result<Option<E::InternalType>, SchemaError> {
        decl.map(|decl| self.resolve(decl)).transpose()
    }

    /// Bind a named declaration in the registry.
    ///
    /// A name, once bound, always maps to the same declaring object: binding a different
    /// declaration under a taken name fails, re-registering the same one is a no-op.
    pub fn register(&self, decl: &Arc<dyn NamedTypeDecl<E>>) -> Result<(), SchemaError> {
        match self.type_names.entry(decl.type_name().to_string()) {
            Entry::Occupied(existing) => {
                if !Arc::ptr_eq(existing.get(), decl) {
                    return Err(SchemaError::NameCollision {
                        name: decl.type_name().to_string(),
                    });
                }
            }
            Entry::Vacant(vacant) => {
                tracing::debug!(name = decl.type_name(), "registering named type");
                vacant.insert(Arc::clone(decl));
            }
        }
        Ok(())
    }

    /// Force resolution of the query root, warming the reachable type graph.
    pub fn setup(&self) -> Result<(), SchemaError> {
        let query = self.query.as_ref().ok_or(SchemaError::MissingQueryRoot)?;
        self.resolve(query)?;
        Ok(())
    }

    /// Look up a registered declaration by name.
    ///
    /// Resolution of the query root is forced first, so every declaration reachable from it is
    /// registered before the lookup happens.
    pub fn get_type(&self, name: &str) -> Result<Arc<dyn NamedTypeDecl<E>>, SchemaError> {
        self.setup()?;
        self.type_names
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| SchemaError::TypeNotFound {
                name: name.to_string(),
            })
    }

    /// Best-effort reverse lookup from an engine type to its registered declaration.
    pub fn object_type(&self, internal: &E::InternalType) -> Option<Arc<dyn NamedTypeDecl<E>>> {
        let name = self.engine.type_name(internal)?;
        self.type_names
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Names currently bound in the registry.
    pub fn registered_type_names(&self) -> Vec<String> {
        self.type_names
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Assemble the engine's executable schema from the configured roots.
    ///
    /// The inner types are memoized; the assembled wrapper is rebuilt on every call so that it
    /// always reflects the current roots.
    pub fn schema(&self) -> Result<E::Schema, SchemaError> {
        let query = self.query.as_ref().ok_or(SchemaError::MissingQueryRoot)?;
        let query = self.resolve(query)?;
        let mutation = self.resolve_optional(self.mutation.as_ref())?;
        let subscription = self.resolve_optional(self.subscription.as_ref())?;
        self.engine
            .assemble(query, mutation, subscription)
            .map_err(SchemaError::Assembly)
    }

    fn executor(&self) -> &dyn Executor<E> {
        self.executor
            .get_or_init(|| Box::new(SyncExecutor))
            .as_ref()
    }

    /// Install a caller-supplied executor.
    ///
    /// Fails once the default executor has materialized, i.e. after the first execution.
    pub fn set_executor(&mut self, executor: Box<dyn Executor<E>>) -> Result<(), SchemaError> {
        self.executor
            .set(executor)
            .map_err(|_| SchemaError::ExecutorInstalled)
    }

    /// Execute one request through the plugin chain and the engine.
    ///
    /// Plugin scopes are entered in registration order before the engine call and exited in
    /// reverse order after it, whether the call produced data, result-level errors, or a
    /// configuration error. Engine-level errors ride inside the returned [`Response`].
    #[tracing::instrument(skip_all, fields(schema = %self.name))]
    pub fn execute(&self, request: &str, mut args: ExecutionArgs) -> Result<Response, SchemaError> {
        let mut scopes: Vec<Box<dyn ExecutionScope>> = Vec::new();
        for plugin in &self.plugins {
            if let Some(scope) = plugin.context_execution(&mut args) {
                scopes.push(scope);
            }
        }
        // Assembled inside the scopes so that resolution triggered here is visible to plugins
        // that wrapped the call.
        let result = self
            .schema()
            .map(|schema| self.executor().execute(&self.engine, &schema, request, &args));
        for scope in scopes.into_iter().rev() {
            scope.exit(&mut args);
        }
        result
    }

    /// Run the engine's standard introspection query and return its data payload.
    pub fn introspect(&self) -> Result<Value, SchemaError> {
        let response = self.execute(self.engine.introspection_query(), ExecutionArgs::default())?;
        Ok(response.data)
    }

    /// Render the schema in the engine's text form.
    pub fn print(&self) -> Result<String, SchemaError> {
        let schema = self.schema()?;
        Ok(self.engine.print_schema(&schema))
    }
}

impl<E: Engine> fmt::Debug for Schema<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("engine", &self.engine)
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("cached_types", &self.types.len())
            .field("registered_names", &self.registered_type_names())
            .finish()
    }
}

/// Builds a [`Schema`].
///
/// Unless [`SchemaBuilder::auto_camel_case`] opts out, the [`CamelCase`] plugin is injected
/// first, before any explicitly supplied plugins.
pub struct SchemaBuilder<E: Engine> {
    engine: E,
    name: String,
    query: Option<TypeRef<E>>,
    mutation: Option<TypeRef<E>>,
    subscription: Option<TypeRef<E>>,
    plugins: Vec<Box<dyn Plugin<E>>>,
    executor: Option<Box<dyn Executor<E>>>,
    auto_camel_case: bool,
}

impl<E: Engine> SchemaBuilder<E> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn query(mut self, query: TypeRef<E>) -> Self {
        self.query = Some(query);
        self
    }

    pub fn mutation(mut self, mutation: TypeRef<E>) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn subscription(mut self, subscription: TypeRef<E>) -> Self {
        self.subscription = Some(subscription);
        self
    }

    pub fn plugin(mut self, plugin: impl Plugin<E>) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn executor(mut self, executor: impl Executor<E> + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    pub fn auto_camel_case(mut self, enabled: bool) -> Self {
        self.auto_camel_case = enabled;
        self
    }

    pub fn build(self) -> Schema<E> {
        let mut schema = Schema {
            engine: self.engine,
            name: self.name,
            query: self.query,
            mutation: self.mutation,
            subscription: self.subscription,
            plugins: Vec::new(),
            executor: OnceCell::new(),
            types: DashMap::new(),
            type_names: DashMap::new(),
        };
        if let Some(executor) = self.executor {
            let _ = schema.executor.set(executor);
        }
        if self.auto_camel_case {
            schema.add_plugin(Box::new(CamelCase));
        }
        for plugin in self.plugins {
            schema.add_plugin(plugin);
        }
        schema
    }
}
