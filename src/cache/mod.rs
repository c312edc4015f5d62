//! Cache for previously retrieved Mars rover image URLs
//!
//! This module provides the in-memory `ImageCache` mapping keyed by rover,
//! camera, and date, and a `CacheStore` that persists it to a single JSON
//! file between runs. A missing cache file is a normal first-run state.

mod images;
mod store;

pub use images::ImageCache;
pub use store::{CacheError, CacheStore};
