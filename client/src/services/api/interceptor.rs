//! # Request/Response Interception
//!
//! Every call made by [`super::ApiClient`] passes through here twice:
//!
//! - **Outgoing**: [`authorize`] attaches `Authorization: Bearer <token>` when a token is
//!   stored. No refresh, no retry.
//! - **Incoming**: [`intercept`] decodes the body and turns non-success statuses into
//!   [`ClientError`]s. On HTTP 401 it decides whether the stored token is stale.
//!
//! ## Token Invalidation Heuristic
//!
//! The backend answers both "credential invalid" and some business-rule rejections with
//! 401. Clearing the token on every 401 would log users out because, say, the contact
//! mailer is misconfigured. [`classify_auth_failure`] keeps the token unless the failing
//! path is an auth endpoint and neither the path nor the message looks like a business
//! failure. This is substring matching over free text and will misfire if the backend
//! rewords its messages; the tests below pin the current behaviour.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;

use super::normalize::error_message;
use crate::core::error::{ClientError, Result};
use crate::services::token_store::TokenStore;

/// Status the backend uses for authentication failures.
pub const AUTH_FAILURE_STATUS: u16 = 401;

const BUSINESS_PATHS: [&str; 3] = ["/email", "/contact", "/blogs"];
const BUSINESS_KEYWORDS: [&str; 5] = ["address", "inactive", "email", "service", "configuration"];
const AUTH_PATHS: [&str; 3] = ["/auth/", "/login", "/signup"];

/// Outcome of classifying a 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Path belongs to a domain endpoint (mail, blogs, users outside auth).
    BusinessEndpoint,
    /// Message reads like a domain rejection.
    BusinessError,
    /// Genuine credential failure on an auth endpoint.
    AuthEndpoint,
    /// Anything else: keep the token and let the caller decide.
    Unclassified,
}

impl FailureClass {
    pub fn invalidates_token(&self) -> bool {
        matches!(self, FailureClass::AuthEndpoint)
    }
}

pub fn is_business_endpoint(path: &str) -> bool {
    BUSINESS_PATHS.iter().any(|p| path.contains(p))
        || (path.contains("/users") && !path.contains("/auth/"))
}

pub fn is_business_error(message: &str) -> bool {
    let message = message.to_lowercase();
    BUSINESS_KEYWORDS.iter().any(|k| message.contains(k))
}

pub fn is_auth_endpoint(path: &str) -> bool {
    AUTH_PATHS.iter().any(|p| path.contains(p))
}

/// Classify a 401 from `path` carrying `message`.
pub fn classify_auth_failure(path: &str, message: &str) -> FailureClass {
    if is_business_endpoint(path) {
        FailureClass::BusinessEndpoint
    } else if is_business_error(message) {
        FailureClass::BusinessError
    } else if is_auth_endpoint(path) {
        FailureClass::AuthEndpoint
    } else {
        FailureClass::Unclassified
    }
}

/// Attach the stored bearer token, if any.
pub fn authorize(builder: RequestBuilder, tokens: &dyn TokenStore) -> RequestBuilder {
    match tokens.get() {
        Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
        None => builder,
    }
}

/// Decode a response into JSON, mapping failures and applying the 401 policy.
///
/// Empty success bodies decode to `Value::Null`.
pub async fn intercept(response: Response, path: &str, tokens: &dyn TokenStore) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(&text).map_err(|source| ClientError::Decode {
            context: "response body",
            source,
        });
    }

    Err(failure(status, &text, path, tokens))
}

/// Build the error for a non-success response, clearing the token when a 401 warrants it.
pub fn failure(status: StatusCode, text: &str, path: &str, tokens: &dyn TokenStore) -> ClientError {
    let body = serde_json::from_str::<Value>(text).unwrap_or(Value::Null);
    // Classification only trusts a structured message; raw text is for display.
    let structured = error_message(&body);
    let mut message = structured.clone();
    if message.is_empty() && !body.is_object() {
        message = text.trim().to_string();
    }
    if message.is_empty() {
        message = status.canonical_reason().unwrap_or("Request failed").to_string();
    }

    if status.as_u16() == AUTH_FAILURE_STATUS {
        let class = classify_auth_failure(path, &structured);
        if class.invalidates_token() {
            tracing::info!(path, "Clearing stored token after authentication failure");
            tokens.clear();
        } else {
            tracing::debug!(path, ?class, "Keeping stored token after 401");
        }
        return ClientError::Unauthorized {
            status: status.as_u16(),
            message,
        };
    }

    tracing::warn!(path, status = status.as_u16(), error = %message, "Request failed");
    ClientError::Http {
        status: status.as_u16(),
        message,
    }
}
