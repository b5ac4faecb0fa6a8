use crate::prelude::graphql::*;
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Any error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while configuring or resolving a schema.
///
/// These are raised synchronously at the point of misuse. Execution-time errors are not
/// represented here: the engine reports them through [`Response::errors`] instead.
#[derive(Error, Display, Debug)]
pub enum SchemaError {
    /// the schema has no query root type
    MissingQueryRoot,

    /// type '{name}' is already registered with a different declaring type
    NameCollision {
        /// The contested type name.
        name: String,
    },

    /// type '{name}' not found in schema
    TypeNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// converting type '{name}' failed: {source}
    Conversion {
        /// Name of the declaration whose conversion factory failed.
        name: String,
        #[source]
        source: BoxError,
    },

    /// schema assembly failed: {0}
    Assembly(#[source] BoxError),

    /// an executor is already installed
    ExecutorInstalled,
}

/// A GraphQL error produced during execution.
///
/// Carried inside [`Response`], never thrown across [`Schema::execute`]'s boundary.
#[derive(Error, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// The error message.
    pub message: String,

    /// The locations of the error in the originating request.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub locations: Vec<Location>,

    /// The path to the response field the error applies to.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<Value>,

    /// The optional GraphQL extensions.
    #[serde(default, skip_serializing_if = "Object::is_empty")]
    pub extensions: Object,
}

/// A location in the request that triggered a GraphQL error.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// The line number.
    pub line: i32,

    /// The column number.
    pub column: i32,
}
