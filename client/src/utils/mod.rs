//! # Utility Functions
//!
//! - [`image_url`]: Image proxy / direct URL resolution

pub mod image_url;

pub use image_url::{direct_image_url, proxied_image_url, resolve_image_url, PLACEHOLDER_IMAGE};
