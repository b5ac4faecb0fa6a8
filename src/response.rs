use crate::prelude::graphql::*;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// The engine's answer to one execution request.
///
/// GraphQL does not use transport error codes: a failed execution still produces a response,
/// with the failure carried in [`Response::errors`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
#[builder(field_defaults(setter(into)))]
pub struct Response {
    /// The response data.
    #[serde(skip_serializing_if = "skip_data_if", default)]
    #[builder(default = Value::Object(Default::default()))]
    pub data: Value,

    /// The GraphQL errors encountered, if any.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    #[builder(default)]
    pub errors: Vec<Error>,

    /// The optional GraphQL extensions.
    #[serde(skip_serializing_if = "Object::is_empty", default)]
    #[builder(default)]
    pub extensions: Object,
}

fn skip_data_if(value: &Value) -> bool {
    match value {
        Value::Object(o) => o.is_empty(),
        Value::Null => true,
        _ => false,
    }
}

impl Response {
    /// Wrap a single error in an otherwise empty response.
    pub fn from_error(error: Error) -> Self {
        Response::builder().errors(vec![error]).build()
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
