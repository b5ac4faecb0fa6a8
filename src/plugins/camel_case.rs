use crate::prelude::graphql::*;

/// Applies the GraphQL convention of camelCased names to generated type and field names.
///
/// Injected first into every schema's plugin chain unless the builder opts out with
/// [`SchemaBuilder::auto_camel_case`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CamelCase;

impl<E: Engine> Plugin<E> for CamelCase {
    fn default_namedtype_name(&self, name: &str) -> Option<String> {
        Some(to_camel_case(name))
    }

    fn name(&self) -> &'static str {
        "camel_case"
    }
}

/// Convert a snake_case name to camelCase.
///
/// The first segment is kept verbatim; every following segment is title-cased. Empty segments
/// (consecutive or leading underscores) contribute nothing, so `__typename` becomes `Typename`.
pub fn to_camel_case(name: &str) -> String {
    let mut segments = name.split('_');
    let mut out = String::with_capacity(name.len());
    if let Some(first) = segments.next() {
        out.push_str(first);
    }
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    out
}
