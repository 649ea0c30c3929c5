//! # Services Module
//!
//! ```text
//! services/
//! ├── api/            - Backend HTTP API client and response normalization
//! ├── site.rs         - Page-level helpers built on ApiService
//! └── token_store.rs  - Bearer token persistence
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  site helpers (featured blogs, profile, ...) │
//! │                 │ &dyn ApiService            │
//! │                 ▼                            │
//! │  ApiClient ──► interceptor ──► normalize     │
//! │      │                                       │
//! │      └──► TokenStore (file / memory)         │
//! └──────┼───────────────────────────────────────┘
//!        │ HTTP/JSON
//!        ▼
//!  Backend API (/auth, /users, /blogs, /images, /email)
//! ```

pub mod api;
pub mod site;
pub mod token_store;

pub use api::ApiClient;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
