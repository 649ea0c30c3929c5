//! # Shared Utility Functions
//!
//! ## Timestamps
//!
//! Envelopes carry timestamps as strings. When the backend omits one, the client fills it
//! with [`now_timestamp`], which matches the backend's own format (RFC 3339, millisecond
//! precision, `Z` suffix).
//!
//! ```rust
//! use shared::utils::now_timestamp;
//!
//! let ts = now_timestamp();
//! assert!(ts.ends_with('Z'));
//! assert_eq!(ts.len(), "2025-01-01T00:00:00.000Z".len());
//! ```

use chrono::{SecondsFormat, Utc};

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_timestamp_parses_back() {
        let ts = now_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        assert!(ts.ends_with('Z'));
    }
}
