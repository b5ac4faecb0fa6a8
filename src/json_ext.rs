//! JSON representation shared with the engine boundary.
//!
//! Insertion order is preserved so that printed and serialized output is stable.

use serde_json_bytes::ByteString;
pub use serde_json_bytes::Map;
pub use serde_json_bytes::Value;

/// A JSON object.
pub type Object = Map<ByteString, Value>;
