//! Field deserializers that never fail a request body over a field's JSON type.
//!
//! A value that is not a string reads as empty, so the request is rejected by
//! validation with the endpoint's own message instead of an extractor error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

pub(crate) fn trimmed_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    text(deserializer).map(|text| text.trim().to_string())
}
