//! Conversion between the in-memory `exercises` document and the JSON text
//! stored in its column.

use serde_json::{Map, Value};
use thiserror::Error;

/// A schema-less mapping from slot name to an arbitrary JSON value.
///
/// Keys are plain strings, so a lookup by `"squat"` is the only way to reach
/// the `squat` entry regardless of how the caller spelled it originally.
pub type Document = Map<String, Value>;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("Fields `{0}` and `{1}` are both present")]
    ConflictingFields(&'static str, &'static str),
}

/// Serialize a document for storage. An absent document is stored as `{}`.
pub fn encode(document: Option<&Document>) -> String {
    match document {
        // String keys and `Value`s always serialize, so the error arm is dead.
        Some(doc) => match serde_json::to_string(doc) {
            Ok(text) => text,
            Err(e) => unreachable!("JSON map failed to serialize: {e}"),
        },
        None => "{}".to_string(),
    }
}

/// Parse stored text back into a document.
///
/// Absent, blank and `null` inputs yield an empty document; anything else
/// that is not a JSON object is an error.
pub fn decode(text: Option<&str>) -> Result<Document, DecodeError> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(Document::new());
    };

    match serde_json::from_str::<Value>(text)? {
        Value::Object(doc) => Ok(doc),
        Value::Null => Ok(Document::new()),
        other => Err(DecodeError::NotAnObject(kind_of(&other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
