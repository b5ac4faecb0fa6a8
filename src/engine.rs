use crate::prelude::graphql::*;
use std::fmt::Debug;

/// An external GraphQL execution engine.
///
/// The engine owns the actual type system, validation and execution algorithm. The facade only
/// needs four things from it: an internal type representation, schema assembly from resolved
/// root types, request execution, and the standard introspection/printing utilities.
pub trait Engine: Send + Sync + Debug + 'static {
    /// The engine's own representation of a type.
    ///
    /// Clones must share identity: the facade hands out clones of a single converted object per
    /// declaration, and the engine is expected to treat them as the same type.
    type InternalType: Clone + Send + Sync;

    /// The engine's executable schema, assembled from resolved root types.
    type Schema: Send + Sync;

    /// Assemble an executable schema from resolved root types.
    fn assemble(
        &self,
        query: Self::InternalType,
        mutation: Option<Self::InternalType>,
        subscription: Option<Self::InternalType>,
    ) -> Result<Self::Schema, BoxError>;

    /// Run one request to completion against an assembled schema.
    ///
    /// Validation and resolver failures are reported through [`Response::errors`], never as a
    /// Rust error.
    fn execute(&self, schema: &Self::Schema, request: &str, args: &ExecutionArgs) -> Response;

    /// The name the engine assigned to an internal type, if it carries one.
    fn type_name<'a>(&self, ty: &'a Self::InternalType) -> Option<&'a str>;

    /// The engine's standard introspection query source.
    fn introspection_query(&self) -> &'static str;

    /// Render an assembled schema in the engine's text form.
    fn print_schema(&self, schema: &Self::Schema) -> String;
}

/// Dispatches one request into an engine.
///
/// The default is [`SyncExecutor`]; callers may install their own before first use to add
/// concerns like timeouts or instrumentation around the engine call.
pub trait Executor<E: Engine>: Send + Sync + Debug {
    fn execute(
        &self,
        engine: &E,
        schema: &E::Schema,
        request: &str,
        args: &ExecutionArgs,
    ) -> Response;
}

/// The default executor: processes one request to completion on the calling thread.
#[derive(Clone, Debug, Default)]
pub struct SyncExecutor;

impl<E: Engine> Executor<E> for SyncExecutor {
    fn execute(
        &self,
        engine: &E,
        schema: &E::Schema,
        request: &str,
        args: &ExecutionArgs,
    ) -> Response {
        engine.execute(schema, request, args)
    }
}
