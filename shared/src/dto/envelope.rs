//! # Response Envelopes
//!
//! Canonical shapes produced by the client after unwrapping raw backend bodies.

use serde::{Deserialize, Serialize};

/// Canonical single-item response.
///
/// `data` never holds one of the raw nested wrapper shapes; the client strips them
/// before constructing an envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: String,
}

impl<T> Envelope<T> {
    /// Replace the payload while keeping `success` and `timestamp`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: f(self.data),
            timestamp: self.timestamp,
        }
    }
}

/// Canonical paginated response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PagedEnvelope<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub meta: PageMeta,
    pub timestamp: String,
}

impl<T> PagedEnvelope<T> {
    /// Empty result used when a list body cannot be recognized at all.
    pub fn empty(page: u32, limit: u32, timestamp: String) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            meta: PageMeta::empty(page, limit),
            timestamp,
        }
    }
}

/// Pagination metadata.
///
/// Best-effort only: the backend is expected to keep `total >= data.len()` but nothing
/// enforces it, so callers must not rely on it for indexing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Metadata for a response that omitted pagination: everything fits on one page.
    pub fn single_page(page: u32, limit: u32, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: 1,
            has_next_page: false,
            has_previous_page: false,
        }
    }

    /// Zeroed metadata for a missing list.
    pub fn empty(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            total: 0,
            total_pages: 0,
            has_next_page: false,
            has_previous_page: false,
        }
    }
}
