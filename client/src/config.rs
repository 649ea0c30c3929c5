//! # Client Configuration
//!
//! Configuration is read from environment variables (a `.env` file is loaded by the binary
//! before this runs) and validated once at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `FLIGHTTRAVEL_API_URL` | `http://localhost:3000` |
//! | `FLIGHTTRAVEL_TOKEN_DIR` | `$HOME/.config/flighttravel` |
//! | `FLIGHTTRAVEL_FEATURED_TIMEOUT_MS` | `10000` |
//! | `FLIGHTTRAVEL_FEATURED_COUNT` | `3` |
//! | `FLIGHTTRAVEL_LOG_DIR` | unset (stderr only) |
//! | `RUST_LOG` | `client=info,warn` |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::core::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOG_FILTER: &str = "client=info,warn";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, already normalized by [`normalize_base_url`]
    pub api_base_url: String,
    /// Directory holding the persisted token file
    pub token_dir: PathBuf,
    /// Deadline for the home-page featured blogs call
    pub featured_timeout: Duration,
    /// How many featured blogs the home page shows
    pub featured_count: u32,
    /// Enables the rolling file log when set
    pub log_dir: Option<PathBuf>,
    /// `EnvFilter` directive
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: normalize_base_url(DEFAULT_API_URL),
            token_dir: default_token_dir(),
            featured_timeout: Duration::from_millis(10_000),
            featured_count: 3,
            log_dir: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let api_base_url = lookup("FLIGHTTRAVEL_API_URL")
            .map(|url| normalize_base_url(&url))
            .unwrap_or(defaults.api_base_url);

        let token_dir = lookup("FLIGHTTRAVEL_TOKEN_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.token_dir);

        let featured_timeout = parse_var::<u64>(&lookup, "FLIGHTTRAVEL_FEATURED_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.featured_timeout);

        let featured_count = parse_var::<u32>(&lookup, "FLIGHTTRAVEL_FEATURED_COUNT")?
            .unwrap_or(defaults.featured_count);

        let config = Self {
            api_base_url,
            token_dir,
            featured_timeout,
            featured_count,
            log_dir: lookup("FLIGHTTRAVEL_LOG_DIR").map(PathBuf::from),
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(ClientError::Config("FLIGHTTRAVEL_API_URL must not be empty".to_string()));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "FLIGHTTRAVEL_API_URL must start with http:// or https://, got {}",
                self.api_base_url
            )));
        }
        if self.featured_timeout.is_zero() {
            return Err(ClientError::Config(
                "FLIGHTTRAVEL_FEATURED_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ClientError::Config(format!("{} must be a valid number: {}", name, e)))
        })
        .transpose()
}

fn default_token_dir() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".config").join("flighttravel"))
        .unwrap_or_else(|_| PathBuf::from(".flighttravel"))
}

/// Rewrite `localhost` to `127.0.0.1` (forces IPv4, avoiding `::1` resolution stalls)
/// and drop trailing slashes.
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    let url = if url.contains("localhost") && !url.contains("127.0.0.1") {
        url.replacen("localhost", "127.0.0.1", 1)
    } else {
        url.to_string()
    };
    url.trim_end_matches('/').to_string()
}
