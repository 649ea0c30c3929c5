//! # Common Error Types
//!
//! Consolidated error handling for the backend client.
//!
//! ## Error Categories
//!
//! - **Transport**: the request never produced an HTTP response (connection refused, DNS,
//!   reset). Propagated untouched.
//! - **Unauthorized**: HTTP 401. The response interceptor may already have cleared the
//!   stored token (see [`crate::services::api::interceptor`]); the error is always
//!   re-surfaced.
//! - **Http**: any other non-success status, typically a business-rule rejection.
//! - **Extraction**: the body decoded as JSON but the expected payload was missing at every
//!   nesting depth. Carries the raw body for diagnostics.
//! - **Authentication**: an auth endpoint answered successfully without a token.
//!
//! ## User-Facing Messages
//!
//! [`ClientError::user_message`] produces what a page should display: transport and
//! extraction failures get a generic retry-later notice, business failures get the
//! server's message verbatim.
//!
//! ```rust
//! use client::core::error::ClientError;
//!
//! let err = ClientError::Http {
//!     status: 400,
//!     message: "Email address is invalid".to_string(),
//! };
//! assert_eq!(err.user_message(), "Email address is invalid");
//! ```

use std::time::Duration;
use thiserror::Error;

/// Text shown for failures the user cannot act on.
pub const RETRY_LATER_MESSAGE: &str =
    "The service is temporarily unavailable. Please try again later.";

/// Client-wide error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure: connection refused, timeout inside the HTTP stack, TLS.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 401. `message` is extracted from `message`, `error` or `data.message`.
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Expected payload missing at every nesting depth.
    #[error("Failed to extract {context} from API response: {body}")]
    Extraction { context: &'static str, body: String },

    /// Located payload did not match the record shape.
    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Auth endpoint succeeded without handing out a token.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-imposed deadline elapsed.
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl ClientError {
    /// Build an extraction error carrying the unrecognized body.
    pub fn extraction(context: &'static str, body: &serde_json::Value) -> Self {
        ClientError::Extraction {
            context,
            body: body.to_string(),
        }
    }

    /// HTTP status code, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { status, .. } | ClientError::Http { status, .. } => {
                Some(*status)
            }
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-provided rejection (as opposed to infrastructure failure).
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            ClientError::Http { .. } | ClientError::Unauthorized { .. }
        )
    }

    /// Text suitable for showing to the end user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthorized { message, .. } | ClientError::Http { message, .. }
                if !message.is_empty() =>
            {
                message.clone()
            }
            ClientError::Authentication(reason) => format!("Authentication failed: {}", reason),
            ClientError::Unauthorized { .. } => "Please sign in again.".to_string(),
            _ => RETRY_LATER_MESSAGE.to_string(),
        }
    }
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_business_message_is_verbatim() {
        let err = ClientError::Unauthorized {
            status: 401,
            message: "Account inactive".to_string(),
        };
        assert!(err.is_business());
        assert_eq!(err.user_message(), "Account inactive");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_extraction_is_generic_for_users() {
        let err = ClientError::extraction("user", &json!({"unexpected": true}));
        assert!(!err.is_business());
        assert_eq!(err.user_message(), RETRY_LATER_MESSAGE);
        assert!(err.to_string().contains("{\"unexpected\":true}"));
    }

    #[test]
    fn test_empty_http_message_falls_back() {
        let err = ClientError::Http {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), RETRY_LATER_MESSAGE);
    }

    #[test]
    fn test_timeout_display() {
        let err = ClientError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "Request timed out after 1500ms");
    }
}
