use crate::prelude::graphql::*;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// The mutable execution arguments threaded through the plugin chain and handed to the
/// executor alongside the request source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
#[builder(field_defaults(setter(into)))]
pub struct ExecutionArgs {
    /// The root value the engine starts resolution from.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default)]
    pub root: Option<Value>,

    /// The variables in the form of a JSON object.
    #[serde(skip_serializing_if = "Object::is_empty", default)]
    #[builder(default)]
    pub variables: Object,

    /// The operation to run when the request source contains several.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default)]
    pub operation_name: Option<String>,

    /// Caller-supplied context passed through to the engine's resolvers.
    #[serde(skip_serializing_if = "Object::is_empty", default)]
    #[builder(default)]
    pub context: Object,

    /// Free-form extensions; plugins may rewrite these around a call.
    #[serde(skip_serializing_if = "Object::is_empty", default)]
    #[builder(default)]
    pub extensions: Object,
}
