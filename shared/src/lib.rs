//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the FlightTravel site and the backend API.
//! All DTOs use JSON serialization via `serde` and mirror the backend's field names.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: Canonical `{success, data, timestamp}` envelopes and page metadata
//!   - **[`dto::auth`]**: Login/signup requests and the normalized auth payload
//!   - **[`dto::user`]**, **[`dto::blog`]**, **[`dto::image`]**: Passthrough entity records
//!   - **[`dto::email`]**: Contact and notification mail bodies
//!   - **[`dto::status`]**: Role and status enums, parsed case-insensitively
//! - **[`utils`]**: Shared helpers (ISO-8601 timestamps)
//!
//! ## Wire Format
//!
//! The backend speaks **camelCase** JSON (`firstName`, `createdAt`, `totalPages`), with the
//! single exception of `access_token` in auth payloads. Entity records keep any field they do
//! not model in an `extra` map so a record survives a decode/encode cycle unchanged.
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::blog::Blog;
//! use shared::dto::status::BlogStatus;
//!
//! let blog: Blog = serde_json::from_value(serde_json::json!({
//!     "id": "b1",
//!     "title": "Lisbon in spring",
//!     "status": "published"
//! }))
//! .unwrap();
//!
//! assert_eq!(blog.status(), Some(BlogStatus::Published));
//! assert!(blog.is_published());
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
