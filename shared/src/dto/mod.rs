//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged with the backend REST API.
//!
//! ## Module Organization
//!
//! - [`envelope`] - `Envelope<T>`, `PagedEnvelope<T>` and `PageMeta`
//! - [`auth`] - Login, signup and the normalized auth result
//! - [`user`] - User records and user mutation bodies
//! - [`blog`] - Blog records and blog mutation bodies
//! - [`image`] - Image records
//! - [`email`] - Email and notification bodies
//! - [`status`] - `Role`, `UserStatus`, `BlogStatus`
//! - [`lenient`] - Null-tolerant field decoding for pass-through records
//!
//! ## Example JSON Communication
//!
//! The backend wraps payloads inconsistently. All of these carry the same user:
//!
//! ```text
//! { "id": "u1", "email": "a@b.io" }
//! { "success": true, "data": { "id": "u1", "email": "a@b.io" } }
//! { "success": true, "data": { "success": true, "data": { "id": "u1" } }, "timestamp": "..." }
//! ```
//!
//! The client normalizes every variant into [`envelope::Envelope`] before the UI sees it.

pub mod auth;
pub mod blog;
pub mod email;
pub mod envelope;
pub mod image;
pub mod lenient;
pub mod status;
pub mod user;

pub use auth::*;
pub use blog::*;
pub use email::*;
pub use envelope::*;
pub use image::*;
pub use status::*;
pub use user::*;
