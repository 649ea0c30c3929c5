//! # Backend API Client Module
//!
//! HTTP client for the travel-site backend. Normalizes the backend's inconsistently nested
//! responses into canonical envelopes and manages the bearer token.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs          - Module exports and documentation
//! ├── client.rs       - ApiClient struct, request plumbing, ApiService impl
//! ├── interceptor.rs  - Bearer attachment and 401 classification
//! ├── normalize.rs    - Payload location and envelope reconstruction
//! ├── auth.rs         - Login and signup
//! ├── users.rs        - User endpoints
//! ├── blogs.rs        - Blog endpoints
//! ├── images.rs       - Image upload, proxy and metadata endpoints
//! └── email.rs        - Email and notification endpoints
//! ```

pub mod auth;
pub mod blogs;
pub mod client;
pub mod email;
pub mod images;
pub mod interceptor;
pub mod normalize;
pub mod users;

pub use client::ApiClient;
pub use images::ImageUpload;
pub use interceptor::FailureClass;
