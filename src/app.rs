//! Per-run application context
//!
//! Wires resolved settings, the cache store, and the in-memory cache into
//! one handle constructed at process start and passed to the command that
//! needs it. The cache is loaded once here, mutated during window assembly,
//! and persisted exactly once after a successful run; a failed run leaves
//! the stored cache untouched.

use chrono::Local;
use thiserror::Error;

use crate::cache::{CacheError, CacheStore, ImageCache};
use crate::config::Settings;
use crate::data::{PhotoError, PhotoSource};
use crate::window::{assemble_window, WindowResponse};

/// Errors surfaced by the get pipeline
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Fetch(#[from] PhotoError),

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-run application state
#[derive(Debug)]
pub struct App {
    settings: Settings,
    store: CacheStore,
    cache: ImageCache,
}

impl App {
    /// Loads the cache from the configured location and prepares it for the
    /// configured rover/camera pair
    ///
    /// A missing cache file starts as an empty cache; an unreadable or
    /// unparseable one is an error.
    pub fn new(settings: Settings) -> Result<Self, CacheError> {
        let store = CacheStore::new(settings.cache_file.clone());
        let mut cache = store.load()?;
        cache.initialize(&settings.rover, &settings.camera);
        Ok(Self {
            settings,
            store,
            cache,
        })
    }

    /// Assembles the ten-day window ending today using the given source
    pub async fn fetch_window<S: PhotoSource + Sync>(
        &mut self,
        source: &S,
    ) -> Result<WindowResponse, PhotoError> {
        let today = Local::now().date_naive();
        assemble_window(
            &mut self.cache,
            source,
            &self.settings.rover,
            &self.settings.camera,
            today,
        )
        .await
    }

    /// Writes the full cache state back to disk
    pub fn persist(&self) -> Result<(), CacheError> {
        self.store.store(&self.cache)
    }

    /// Runs the full get pipeline: assemble the window, persist the cache,
    /// and return the serialized response
    ///
    /// The cache is persisted unconditionally on success, even when every
    /// date was served from it; on a fetch error nothing is written.
    pub async fn run_get<S: PhotoSource + Sync>(&mut self, source: &S) -> Result<String, AppError> {
        let response = self.fetch_window(source).await?;
        self.persist()?;
        Ok(serde_json::to_string(&response)?)
    }
}
