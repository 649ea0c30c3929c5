//! # Core Abstractions
//!
//! - **[`error`]**: Client error type (`ClientError`, `Result<T>`)
//! - **[`service`]**: `ApiService` trait for dependency injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use client::core::ApiService;
//! use client::services::api::ApiClient;
//! use client::services::token_store::MemoryTokenStore;
//!
//! let api: Arc<dyn ApiService> = Arc::new(
//!     ApiClient::with_store("http://localhost:3000", Arc::new(MemoryTokenStore::new())).unwrap(),
//! );
//! ```

pub mod error;
pub mod service;

pub use error::{ClientError, Result};
pub use service::ApiService;
