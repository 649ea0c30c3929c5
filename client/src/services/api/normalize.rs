//! # Response Normalization
//!
//! The backend wraps payloads at inconsistent depths: `{...}`, `{data}`, `{data:{data}}` and
//! `{data:{data:{data}}}` all occur, sometimes on the same endpoint. Every endpoint wrapper
//! funnels its raw body through this module, which locates the payload with one search
//! primitive and rebuilds the canonical [`Envelope`] / [`PagedEnvelope`].
//!
//! ## Search
//!
//! [`locate`] walks the chain of `data` fields from the root (depth 0) down to a maximum
//! depth and returns the **deepest** level accepted by a shape predicate. Envelope metadata
//! is then read from the levels between the root and the match:
//!
//! - `success` comes from the root only, and is `true` unless explicitly `false`.
//! - `timestamp` is the first string `timestamp` found walking root → match, else now.
//! - `meta` (lists only) is the nearest `meta` object enclosing the array.
//!
//! All functions here are pure; token persistence happens in the auth endpoint wrappers.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::error::{ClientError, Result};
use shared::dto::{AuthData, AuthResult, Envelope, PageMeta, PagedEnvelope, User};
use shared::utils::now_timestamp;

/// Deepest `data` nesting the backend has been observed to produce.
pub const MAX_DEPTH: usize = 3;

/// Token field names, in lookup priority order.
const TOKEN_FIELDS: [&str; 2] = ["access_token", "token"];

/// Payload found by [`locate`], with the chain of enclosing levels.
#[derive(Debug)]
pub struct Located<'a> {
    /// `levels[0]` is the root; `levels[depth]` is the match.
    levels: Vec<&'a Value>,
    depth: usize,
}

impl<'a> Located<'a> {
    pub fn value(&self) -> &'a Value {
        self.levels[self.depth]
    }

    /// Number of `data` fields traversed from the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// First string `timestamp` walking from the root down to the match.
    pub fn timestamp(&self) -> Option<&'a str> {
        self.levels[..=self.depth]
            .iter()
            .find_map(|level| level.get("timestamp").and_then(Value::as_str))
    }

    /// Nearest object-valued `key` in a level enclosing the match, innermost first.
    pub fn enclosing(&self, key: &str) -> Option<&'a Map<String, Value>> {
        self.levels[..self.depth]
            .iter()
            .rev()
            .find_map(|level| level.get(key).and_then(Value::as_object))
    }
}

/// `[body, body.data, body.data.data, ...]`, stopping at `max_depth` or the first missing `data`.
fn data_chain(body: &Value, max_depth: usize) -> Vec<&Value> {
    let mut levels = vec![body];
    let mut current = body;
    while levels.len() <= max_depth {
        match current.get("data") {
            Some(next) => {
                levels.push(next);
                current = next;
            }
            None => break,
        }
    }
    levels
}

/// Deepest level within `max_depth` accepted by `predicate`.
pub fn locate<'a>(
    body: &'a Value,
    max_depth: usize,
    predicate: impl Fn(&Value) -> bool,
) -> Option<Located<'a>> {
    let levels = data_chain(body, max_depth);
    let depth = (0..levels.len()).rev().find(|&d| predicate(levels[d]))?;
    Some(Located { levels, depth })
}

/// Field present with a usable value (not null, not `false`, not an empty string).
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Recognizer: object carrying a usable `field`.
pub fn has_field(field: &'static str) -> impl Fn(&Value) -> bool {
    move |value| value.get(field).is_some_and(is_present)
}

/// Recognizer: object carrying any of `fields`.
pub fn has_any_field(fields: &'static [&'static str]) -> impl Fn(&Value) -> bool {
    move |value| fields.iter().any(|f| value.get(*f).is_some_and(is_present))
}

/// `success` of the outermost body; absent or non-boolean counts as `true`.
pub fn root_success(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) != Some(false)
}

fn decode<T: DeserializeOwned>(value: &Value, context: &'static str) -> Result<T> {
    T::deserialize(value).map_err(|source| ClientError::Decode { context, source })
}

/// Extract a single record recognized by `recognizer`.
///
/// Fails with [`ClientError::Extraction`] when no level up to [`MAX_DEPTH`] matches; never
/// returns a default record.
pub fn entity<T: DeserializeOwned>(
    body: &Value,
    context: &'static str,
    recognizer: impl Fn(&Value) -> bool,
) -> Result<Envelope<T>> {
    let located = locate(body, MAX_DEPTH, recognizer).ok_or_else(|| {
        tracing::error!(context, body = %body, "Could not extract record from response");
        ClientError::extraction(context, body)
    })?;

    Ok(Envelope {
        success: root_success(body),
        data: decode(located.value(), context)?,
        timestamp: located
            .timestamp()
            .map(str::to_string)
            .unwrap_or_else(now_timestamp),
    })
}

/// Extract a list and its pagination metadata.
///
/// Missing `meta` is synthesized as a single page. Partial `meta` objects are completed
/// from the same synthesized values. Fails with [`ClientError::Extraction`] when no array
/// is found; the caller decides whether that degrades to an empty page.
pub fn list<T: DeserializeOwned>(
    body: &Value,
    page: u32,
    limit: u32,
    context: &'static str,
) -> Result<PagedEnvelope<T>> {
    let located = locate(body, MAX_DEPTH, Value::is_array)
        .ok_or_else(|| ClientError::extraction(context, body))?;

    let items = located.value().as_array().map(Vec::as_slice).unwrap_or_default();
    let data = items
        .iter()
        .map(|item| decode(item, context))
        .collect::<Result<Vec<T>>>()?;

    let synthesized = PageMeta::single_page(page, limit, data.len() as u64);
    let meta = match located.enclosing("meta") {
        Some(found) => merge_meta(synthesized, found),
        None => synthesized,
    };

    Ok(PagedEnvelope {
        success: root_success(body),
        data,
        meta,
        timestamp: located
            .timestamp()
            .map(str::to_string)
            .unwrap_or_else(now_timestamp),
    })
}

/// [`list`], degrading an unrecognizable body to an empty page with `success: false`.
///
/// Decode failures of individual records still propagate.
pub fn list_or_empty<T: DeserializeOwned>(
    body: &Value,
    page: u32,
    limit: u32,
    context: &'static str,
) -> Result<PagedEnvelope<T>> {
    match list(body, page, limit, context) {
        Err(ClientError::Extraction { .. }) => {
            tracing::warn!(context, body = %body, "List not found in response, returning empty page");
            Ok(PagedEnvelope::empty(page, limit, now_timestamp()))
        }
        other => other,
    }
}

/// Overlay the backend's `meta` fields onto synthesized defaults.
fn merge_meta(defaults: PageMeta, found: &Map<String, Value>) -> PageMeta {
    let mut merged = match serde_json::to_value(defaults) {
        Ok(Value::Object(map)) => map,
        _ => return defaults,
    };
    for (key, value) in found {
        if merged.contains_key(key) && !value.is_null() {
            merged.insert(key.clone(), value.clone());
        }
    }
    PageMeta::deserialize(&Value::Object(merged)).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Unusable pagination meta, assuming a single page");
        defaults
    })
}

/// Extract the token and user from an auth response.
///
/// Looks for `access_token` at every depth (deepest first), then `token`. The `user` is
/// the sibling of whichever token was found. No token anywhere is a hard failure.
pub fn auth(body: &Value) -> Result<AuthResult> {
    let (located, token) = TOKEN_FIELDS
        .iter()
        .find_map(|field| {
            let located = locate(body, MAX_DEPTH, |level| {
                level
                    .get(*field)
                    .and_then(Value::as_str)
                    .is_some_and(|t| !t.is_empty())
            })?;
            let token = located.value().get(*field)?.as_str()?.to_string();
            Some((located, token))
        })
        .ok_or_else(|| {
            tracing::error!(body = %body, "No token found in auth response");
            ClientError::Authentication("No token received from server".to_string())
        })?;

    let user = match located.value().get("user") {
        Some(raw) if raw.is_object() => match decode::<User>(raw, "user") {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Auth response carried an unreadable user");
                None
            }
        },
        _ => None,
    };

    Ok(Envelope {
        success: root_success(body),
        data: AuthData {
            access_token: token,
            user,
        },
        timestamp: located
            .timestamp()
            .map(str::to_string)
            .unwrap_or_else(now_timestamp),
    })
}

/// Envelope for endpoints whose payload is irrelevant (deletes, email sends).
pub fn ack(body: &Value) -> Envelope<()> {
    Envelope {
        success: root_success(body),
        data: (),
        timestamp: body
            .get("timestamp")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(now_timestamp),
    }
}

/// URL of an uploaded image: `url` or `imageUrl` at depth 2, 1, 0, else a string `data`.
pub fn uploaded_url(body: &Value) -> Result<String> {
    let levels = data_chain(body, 2);
    levels
        .iter()
        .rev()
        .find_map(|level| {
            ["url", "imageUrl"].iter().find_map(|field| {
                level
                    .get(*field)
                    .and_then(Value::as_str)
                    .filter(|url| !url.is_empty())
            })
        })
        .or_else(|| body.get("data").and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| {
            tracing::error!(body = %body, "Could not extract image URL from response");
            ClientError::extraction("image URL", body)
        })
}

/// Error text from a failure body: `message`, then `error`, then `data.message`.
///
/// Validation failures sometimes send `message` as an array of strings; those are joined.
pub fn error_message(body: &Value) -> String {
    let text = |value: &Value| -> Option<String> {
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(parts) => {
                let joined = parts
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("; ");
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        }
    };

    body.get("message")
        .and_then(text)
        .or_else(|| body.get("error").and_then(text))
        .or_else(|| body.pointer("/data/message").and_then(text))
        .unwrap_or_default()
}
