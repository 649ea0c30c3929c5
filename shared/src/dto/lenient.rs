//! # Lenient Field Decoding
//!
//! `deserialize_with` helpers for pass-through record fields. The backend sends `null` for
//! cleared columns (a blog whose author was deleted has `"authorId": null`) and is not
//! consistent about numbers versus strings. `#[serde(default)]` alone only covers a missing
//! key, and one strict field would reject a whole list page.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode `null` as `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a string, number or boolean as its string form; `null` becomes empty.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}
