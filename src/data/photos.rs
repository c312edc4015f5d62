//! NASA Mars Rover Photos API client
//!
//! Fetches photo records for a single rover/camera/date triple. Transport
//! failures, non-success statuses, and unparseable bodies are all surfaced
//! as errors; a successful response with an empty photo list is a normal
//! result, not an error.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::{Photo, PhotosResponse};

/// Base URL of the NASA Mars rover photos API
const NASA_BASE_URL: &str = "https://api.nasa.gov/mars-photos/api/v1";

/// Demo API key accepted by the NASA API for low-volume use
const API_KEY: &str = "DEMO_KEY";

/// Errors that can occur when fetching photo records
#[derive(Debug, Error)]
pub enum PhotoError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse the API response body
    #[error("failed to parse API response: {0}")]
    Parse(String),
}

/// Source of photo records for a rover/camera/date triple
///
/// Implemented by the live API client; window assembly is written against
/// this trait so it can be driven by a stub in tests.
#[async_trait]
pub trait PhotoSource {
    /// Returns the photo records for the given rover, camera, and earth
    /// date. An empty list means no photos exist for that date.
    async fn fetch_photos(
        &self,
        rover: &str,
        camera: &str,
        date: NaiveDate,
    ) -> Result<Vec<Photo>, PhotoError>;
}

/// Client for the NASA Mars rover photos API
#[derive(Debug, Clone)]
pub struct PhotoClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
    /// API key sent with every query
    api_key: String,
}

impl PhotoClient {
    /// Creates a new PhotoClient against the NASA API with the demo key
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            base_url: NASA_BASE_URL.to_string(),
            api_key: API_KEY.to_string(),
        }
    }

    /// Creates a new PhotoClient with a custom base URL (for testing)
    #[cfg(test)]
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
            api_key: API_KEY.to_string(),
        }
    }

    /// Builds the photos query URL for the given triple
    fn photos_url(&self, rover: &str, camera: &str, date: NaiveDate) -> String {
        format!(
            "{}/rovers/{}/photos?earth_date={}&camera={}&api_key={}",
            self.base_url,
            rover,
            date.format("%Y-%m-%d"),
            camera,
            self.api_key,
        )
    }
}

impl Default for PhotoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhotoSource for PhotoClient {
    async fn fetch_photos(
        &self,
        rover: &str,
        camera: &str,
        date: NaiveDate,
    ) -> Result<Vec<Photo>, PhotoError> {
        let url = self.photos_url(rover, camera, date);
        debug!(%url, "querying photos endpoint");

        let body = self
            .http_client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: PhotosResponse =
            serde_json::from_str(&body).map_err(|err| PhotoError::Parse(err.to_string()))?;

        debug!(count = response.photos.len(), rover, camera, "photos fetched");
        Ok(response.photos)
    }
}
