//! # FlightTravel API Client
//!
//! Client library for the FlightTravel backend. The backend wraps its payloads at
//! inconsistent depths (`{...}`, `{data}`, `{data:{data}}`, `{data:{data:{data}}}`); this
//! crate hides that behind canonical envelopes from the [`shared`] crate and manages the
//! bearer token across calls.
//!
//! ## Modules
//!
//! - [`core`]: Error type and the `ApiService` trait
//! - [`config`]: Environment-driven configuration
//! - [`logging`]: `tracing` subscriber setup
//! - [`services`]: API client, token storage and page-level helpers
//! - [`utils`]: Image URL resolution
//!
//! ## Example
//!
//! ```rust,no_run
//! use client::config::ClientConfig;
//! use client::core::ApiService;
//! use client::services::api::ApiClient;
//!
//! # async fn run() -> client::core::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config)?;
//! let auth = api.login("ana@example.com", "secret").await?;
//! println!("signed in, token stored: {}", api.token().is_some());
//! # let _ = auth;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod logging;
pub mod services;
pub mod utils;
