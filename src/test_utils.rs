//! Hand-written doubles shared by the unit tests: a minimal engine, declarations with
//! conversion counters, recording plugins and a counting executor.

use crate::prelude::graphql::*;
use serde_json_bytes::ByteString;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) const INTROSPECTION_QUERY: &str = "{ __schema { queryType { name } } }";

/// An engine that answers a handful of canned requests.
///
/// `{ boom }` produces a result-level error, `{ variables }` echoes the execution variables
/// back as data, and the introspection query reports the query root's name.
#[derive(Debug, Default)]
pub(crate) struct MockEngine;

#[derive(Clone, Debug)]
pub(crate) struct MockType {
    inner: Arc<MockTypeInner>,
}

#[derive(Debug)]
struct MockTypeInner {
    name: Option<String>,
    fields: Vec<String>,
}

impl MockType {
    pub(crate) fn named(name: &str, fields: Vec<String>) -> Self {
        MockType {
            inner: Arc::new(MockTypeInner {
                name: Some(name.to_string()),
                fields,
            }),
        }
    }

    pub(crate) fn anonymous(fields: Vec<String>) -> Self {
        MockType {
            inner: Arc::new(MockTypeInner { name: None, fields }),
        }
    }

    pub(crate) fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub(crate) fn fields(&self) -> &[String] {
        &self.inner.fields
    }

    /// Identity comparison, the cache guarantee under test.
    pub(crate) fn same_as(&self, other: &MockType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[derive(Debug)]
pub(crate) struct MockSchema {
    pub(crate) query: MockType,
    pub(crate) mutation: Option<MockType>,
    #[allow(dead_code)]
    pub(crate) subscription: Option<MockType>,
}

impl Engine for MockEngine {
    type InternalType = MockType;
    type Schema = MockSchema;

    fn assemble(
        &self,
        query: MockType,
        mutation: Option<MockType>,
        subscription: Option<MockType>,
    ) -> Result<MockSchema, BoxError> {
        Ok(MockSchema {
            query,
            mutation,
            subscription,
        })
    }

    fn execute(&self, schema: &MockSchema, request: &str, args: &ExecutionArgs) -> Response {
        if request == INTROSPECTION_QUERY {
            let name = schema.query.name().unwrap_or_default();
            let data = serde_json_bytes::to_value(serde_json::json!({
                "__schema": { "queryType": { "name": name } }
            }))
            .expect("introspection data is valid json");
            return Response::builder().data(data).build();
        }
        if request == "{ boom }" {
            return Response::from_error(Error {
                message: "boom".to_string(),
                ..Default::default()
            });
        }
        if request == "{ variables }" {
            return Response::builder()
                .data(Value::Object(args.variables.clone()))
                .build();
        }
        Response::builder().build()
    }

    fn type_name<'a>(&self, ty: &'a MockType) -> Option<&'a str> {
        ty.name()
    }

    fn introspection_query(&self) -> &'static str {
        INTROSPECTION_QUERY
    }

    fn print_schema(&self, schema: &MockSchema) -> String {
        format!(
            "schema {{ query: {} }}",
            schema.query.name().unwrap_or("<anonymous>")
        )
    }
}

/// A named declaration that counts its conversions and runs field names through the schema's
/// naming chain, optionally resolving a nested declaration on the way.
pub(crate) struct TestObject {
    name: String,
    fields: Vec<String>,
    nested: Option<TypeRef<MockEngine>>,
    conversions: Arc<AtomicUsize>,
}

impl TestObject {
    pub(crate) fn new(name: &str, fields: &[&str]) -> Self {
        TestObject {
            name: name.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            nested: None,
            conversions: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn with_nested(name: &str, fields: &[&str], nested: TypeRef<MockEngine>) -> Self {
        let mut object = TestObject::new(name, fields);
        object.nested = Some(nested);
        object
    }

    pub(crate) fn conversions(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.conversions)
    }
}

impl NamedTypeDecl<MockEngine> for TestObject {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn internal_type(&self, schema: &Schema<MockEngine>) -> Result<MockType, BoxError> {
        self.conversions.fetch_add(1, Ordering::SeqCst);
        if let Some(nested) = &self.nested {
            schema.resolve(nested)?;
        }
        let fields = self
            .fields
            .iter()
            .map(|field| schema.default_namedtype_name(field))
            .collect();
        Ok(MockType::named(&self.name, fields))
    }
}

/// An anonymous declaration.
pub(crate) struct InlineObject {
    fields: Vec<String>,
}

impl InlineObject {
    pub(crate) fn new(fields: &[&str]) -> Self {
        InlineObject {
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl InlineTypeDecl<MockEngine> for InlineObject {
    fn internal_type(&self, _schema: &Schema<MockEngine>) -> Result<MockType, BoxError> {
        Ok(MockType::anonymous(self.fields.clone()))
    }
}

/// A named declaration whose conversion factory always fails.
pub(crate) struct FailingObject {
    name: String,
}

impl FailingObject {
    pub(crate) fn new(name: &str) -> Self {
        FailingObject {
            name: name.to_string(),
        }
    }
}

impl NamedTypeDecl<MockEngine> for FailingObject {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn internal_type(&self, _schema: &Schema<MockEngine>) -> Result<MockType, BoxError> {
        Err("conversion exploded".into())
    }
}

pub(crate) type EventLog = Arc<Mutex<Vec<String>>>;

/// Records scope entry and exit into a shared log.
pub(crate) struct Recorder {
    label: &'static str,
    log: EventLog,
}

impl Recorder {
    pub(crate) fn new(label: &'static str, log: EventLog) -> Self {
        Recorder { label, log }
    }
}

impl Plugin<MockEngine> for Recorder {
    fn context_execution(&self, _args: &mut ExecutionArgs) -> Option<Box<dyn ExecutionScope>> {
        self.log
            .lock()
            .expect("log lock")
            .push(format!("enter {}", self.label));
        Some(Box::new(RecorderScope {
            label: self.label,
            log: Arc::clone(&self.log),
        }))
    }
}

struct RecorderScope {
    label: &'static str,
    log: EventLog,
}

impl ExecutionScope for RecorderScope {
    fn exit(self: Box<Self>, _args: &mut ExecutionArgs) {
        self.log
            .lock()
            .expect("log lock")
            .push(format!("exit {}", self.label));
    }
}

/// Appends its suffix to every name it is asked about.
pub(crate) struct Suffix(pub(crate) &'static str);

impl Plugin<MockEngine> for Suffix {
    fn default_namedtype_name(&self, name: &str) -> Option<String> {
        Some(format!("{}{}", name, self.0))
    }
}

/// Sets a variable for the duration of one engine call.
pub(crate) struct VariableInjector {
    key: &'static str,
}

impl VariableInjector {
    pub(crate) fn new(key: &'static str) -> Self {
        VariableInjector { key }
    }
}

impl Plugin<MockEngine> for VariableInjector {
    fn context_execution(&self, args: &mut ExecutionArgs) -> Option<Box<dyn ExecutionScope>> {
        args.variables
            .insert(ByteString::from(self.key.to_string()), Value::Bool(true));
        Some(Box::new(VariableRemover { key: self.key }))
    }
}

struct VariableRemover {
    key: &'static str,
}

impl ExecutionScope for VariableRemover {
    fn exit(self: Box<Self>, args: &mut ExecutionArgs) {
        args.variables.remove(self.key);
    }
}

/// Counts dispatches before forwarding to the engine.
#[derive(Debug, Default)]
pub(crate) struct CountingExecutor {
    calls: Arc<AtomicUsize>,
}

impl CountingExecutor {
    pub(crate) fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Executor<MockEngine> for CountingExecutor {
    fn execute(
        &self,
        engine: &MockEngine,
        schema: &MockSchema,
        request: &str,
        args: &ExecutionArgs,
    ) -> Response {
        self.calls.fetch_add(1, Ordering::SeqCst);
        engine.execute(schema, request, args)
    }
}
