use crate::prelude::graphql::*;

/// A capability object attached to a [`Schema`].
///
/// All capabilities are optional: the defaults contribute nothing, decline naming transforms and
/// install no execution scope. Plugins are applied strictly in registration order; the automatic
/// [`CamelCase`] plugin, when enabled, sits first in the chain.
pub trait Plugin<E: Engine>: Send + Sync + 'static {
    /// Called once, when the plugin is added to the schema.
    fn contribute_to_schema(&mut self, _schema: &mut Schema<E>) {}

    /// Naming transform applied to generated type and field names.
    ///
    /// Return `None` to pass the name to the next plugin unchanged. Transforms fold left to
    /// right over the chain: each plugin sees the previous plugin's output.
    fn default_namedtype_name(&self, _name: &str) -> Option<String> {
        None
    }

    /// Install a scoped context around one engine call.
    ///
    /// Invoked with the mutable execution arguments before the call; the returned scope's
    /// [`ExecutionScope::exit`] runs after the call, in reverse order of installation, whether
    /// or not the engine reported errors in its response.
    fn context_execution(&self, _args: &mut ExecutionArgs) -> Option<Box<dyn ExecutionScope>> {
        None
    }

    fn name(&self) -> &'static str {
        type_name_of(self)
    }
}

fn type_name_of<T: ?Sized>(_: &T) -> &'static str {
    std::any::type_name::<T>()
}

/// The unwind half of a plugin-installed execution context.
///
/// Scopes are exited in reverse entry order, with access to the final execution arguments, so a
/// plugin that rewrote shared state on entry can restore it even if inner plugins mutated the
/// arguments in between.
pub trait ExecutionScope: Send {
    fn exit(self: Box<Self>, args: &mut ExecutionArgs);
}
