//! Schema registration and execution facade over an external GraphQL engine.
//!
//! The caller declares root Query/Mutation/Subscription types as [`TypeRef`]s and builds a
//! [`Schema`]. Declarations are converted into the engine's internal representation lazily and
//! exactly once per declaration; named declarations are additionally registered so they can be
//! looked up by name later. A chain of [`Plugin`]s can rewrite generated names and wrap every
//! engine call in scoped execution contexts.
//!
//! The real type system, validation and execution live behind the [`Engine`] trait: this crate
//! only selects, memoizes and forwards.

mod declaration;
mod engine;
mod error;
mod json_ext;
mod plugin;
mod plugins;
mod request;
mod response;
mod schema;
#[cfg(test)]
mod test_utils;

pub use declaration::*;
pub use engine::*;
pub use error::*;
pub use json_ext::*;
pub use plugin::*;
pub use plugins::*;
pub use request::*;
pub use response::*;
pub use schema::*;

pub mod prelude {
    // NOTE: everything is scoped under the module graphql so the user can use, for example:
    //        -  graphql::Schema to get a schema facade
    //        -  graphql::Response to get a GraphQL response
    //       and still import things explicitly if they prefer to.
    pub mod graphql {
        pub use crate::*;
    }
}
