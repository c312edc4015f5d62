//! In-memory image URL cache
//!
//! Stores Mars rover image URLs using the following hierarchy:
//! top level: rover name, mid level: camera name, bottom level: image date.
//! Values are image URLs in insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// URL lists keyed by `YYYY-MM-DD` date for a single camera
type DateEntries = BTreeMap<String, Vec<String>>;

/// Camera mappings for a single rover
type CameraEntries = BTreeMap<String, DateEntries>;

/// Three-level mapping from rover to camera to date to image URLs
///
/// Serializes transparently as the nested JSON object, so the persisted form
/// is exactly `{rover: {camera: {date: [urls]}}}`. URL lists are append-only
/// within a run and never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageCache {
    rovers: BTreeMap<String, CameraEntries>,
}

impl ImageCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures the camera and date mappings for the given rover/camera pair
    /// exist, creating empty levels as needed
    ///
    /// Idempotent. Lookups on a pair that was never initialized still behave
    /// as "no entry" rather than panicking, so this exists to guarantee the
    /// pair is represented in the persisted state even when no URL is ever
    /// stored for it.
    pub fn initialize(&mut self, rover: &str, camera: &str) {
        self.rovers
            .entry(rover.to_string())
            .or_default()
            .entry(camera.to_string())
            .or_default();
    }

    /// Returns the cached URLs for the exact rover/camera/date triple
    ///
    /// Returns `None` when no entry exists at any level of the hierarchy.
    /// There are no partial-match or prefix lookup semantics.
    pub fn lookup(&self, rover: &str, camera: &str, date: &str) -> Option<&[String]> {
        self.rovers
            .get(rover)?
            .get(camera)?
            .get(date)
            .map(Vec::as_slice)
    }

    /// Appends a URL to the list at the given triple, creating the list if
    /// absent
    ///
    /// Does not deduplicate: the same URL can be appended more than once if
    /// it is fetched twice.
    pub fn put(&mut self, rover: &str, camera: &str, date: &str, url: &str) {
        self.rovers
            .entry(rover.to_string())
            .or_default()
            .entry(camera.to_string())
            .or_default()
            .entry(date.to_string())
            .or_default()
            .push(url.to_string());
    }

    /// Whether the cache holds no rovers at all
    pub fn is_empty(&self) -> bool {
        self.rovers.is_empty()
    }
}
