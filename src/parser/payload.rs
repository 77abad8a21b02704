//! Classification of raw log payloads.
//!
//! A payload is either opaque text or a JSON object whose top-level fields
//! can be promoted into the enriched document. Arrays and scalars count as
//! plain text.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Plain,
    Object(Map<String, Value>),
}

impl Payload {
    pub fn is_object(&self) -> bool {
        matches!(self, Payload::Object(_))
    }

    /// The payload's own `message`, when it is a string.
    pub fn message(&self) -> Option<&str> {
        self.string_field("message")
    }

    /// The payload's self-declared `logtype`, when it is a string.
    pub fn logtype(&self) -> Option<&str> {
        self.string_field("logtype")
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        match self {
            Payload::Object(obj) => obj.get(key).and_then(Value::as_str),
            Payload::Plain => None,
        }
    }
}

/// Parse `raw` once and keep the object if there is one.
pub fn classify(raw: &str) -> Payload {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(obj)) => Payload::Object(obj),
        _ => Payload::Plain,
    }
}

pub fn is_json_object(raw: &str) -> bool {
    classify(raw).is_object()
}
