//! Persistence for the image cache
//!
//! Reads and writes the cache as a single UTF-8 JSON file. A missing cache
//! file loads as an empty cache; any other read, parse, or write failure is
//! an error for the caller to treat as fatal.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use super::ImageCache;

/// Errors that can occur while loading or storing the cache file
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the cache file failed
    #[error("cache file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The cache file exists but does not hold a valid cache document
    #[error("failed to parse cache file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Manages reading and writing the cache file on disk
///
/// The store holds the configured file location and is the only component
/// that performs raw I/O on cache state. It is read once at startup and
/// written once at the end of a successful run.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Location of the cache file
    path: PathBuf,
}

impl CacheStore {
    /// Creates a store backed by the given file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the cache from disk
    ///
    /// Returns an empty cache if the file does not exist yet; a first run
    /// is a normal state, not a failure.
    pub fn load(&self) -> Result<ImageCache, CacheError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no cache file yet, starting empty");
                return Ok(ImageCache::new());
            }
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    /// Serializes the full cache and writes it to disk, replacing any prior
    /// contents entirely
    pub fn store(&self, cache: &ImageCache) -> Result<(), CacheError> {
        let json = serde_json::to_string(cache)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
