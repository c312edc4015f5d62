//! Response assembly for the trailing ten-day photo window
//!
//! Resolves each date in the window cache-first, falling back to the photo
//! source on a miss, writing fetched URLs back into the cache, and capping
//! the assembled response at three image URLs per date.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::ImageCache;
use crate::data::{PhotoError, PhotoSource};

/// Number of trailing calendar days resolved per run, including today
pub const WINDOW_DAYS: i64 = 10;

/// Maximum number of image URLs admitted to the response for one date
pub const MAX_IMAGES_PER_DATE: usize = 3;

/// Date format used for cache keys, response keys, and API queries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Image URLs keyed by date, capped at three URLs per date
///
/// Built fresh per run and discarded after being emitted; never persisted.
/// A date key is present only if at least one URL was admitted for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowResponse {
    dates: BTreeMap<String, Vec<String>>,
}

impl WindowResponse {
    /// Creates an empty response
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to add an image URL to the response for a date
    ///
    /// The first URL for a date is admitted without consulting the cap;
    /// once a date holds entries, further candidates are admitted only while
    /// the count is strictly below the cap and are silently dropped after.
    pub fn add_image(&mut self, date: &str, image_url: &str) {
        match self.dates.get_mut(date) {
            Some(urls) => {
                if urls.len() < MAX_IMAGES_PER_DATE {
                    debug!(date, url = image_url, "adding image");
                    urls.push(image_url.to_string());
                } else {
                    debug!(date, "max images met for date key");
                }
            }
            None => {
                self.dates
                    .insert(date.to_string(), vec![image_url.to_string()]);
            }
        }
    }

    /// Returns the URLs recorded for a date, if any
    pub fn get(&self, date: &str) -> Option<&[String]> {
        self.dates.get(date).map(Vec::as_slice)
    }

    /// Number of dates present in the response
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether no date produced any image
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Returns the consecutive dates of the window ending at and including
/// `today`, oldest first
pub fn window_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (-(WINDOW_DAYS - 1)..=0)
        .map(|offset| today + Duration::days(offset))
        .collect()
}

/// Assembles the response for the ten-day window ending at `today`
///
/// Each date is resolved from the cache first. On a miss the photo source is
/// queried exactly once and every returned URL is appended to the cache as
/// well as offered to the response. A fetch error aborts assembly for the
/// whole window; dates resolved before the failure stay merged in the
/// in-memory cache but no response is produced.
pub async fn assemble_window<S: PhotoSource + Sync>(
    cache: &mut ImageCache,
    source: &S,
    rover: &str,
    camera: &str,
    today: NaiveDate,
) -> Result<WindowResponse, PhotoError> {
    let mut response = WindowResponse::new();

    for date in window_dates(today) {
        let key = date.format(DATE_FORMAT).to_string();

        if let Some(urls) = cache.lookup(rover, camera, &key) {
            debug!(date = %key, count = urls.len(), "cache hit");
            for url in urls {
                response.add_image(&key, url);
            }
        } else {
            let photos = source.fetch_photos(rover, camera, date).await?;
            for photo in photos {
                cache.put(rover, camera, &key, &photo.img_src);
                response.add_image(&key, &photo.img_src);
            }
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CameraInfo, Photo, RoverInfo};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn photo(url: &str, earth_date: &str) -> Photo {
        Photo {
            id: 1,
            sol: 1000,
            camera: CameraInfo {
                id: 20,
                name: "NAVCAM".to_string(),
                rover_id: 5,
                full_name: "Navigation Camera".to_string(),
            },
            img_src: url.to_string(),
            earth_date: earth_date.to_string(),
            rover: RoverInfo {
                id: 5,
                name: "Curiosity".to_string(),
                landing_date: "2012-08-06".to_string(),
                launch_date: "2011-11-26".to_string(),
                status: "active".to_string(),
            },
        }
    }

    /// Photo source stub serving canned URL lists per date and recording
    /// which dates were fetched
    struct StubSource {
        responses: HashMap<String, Vec<String>>,
        fail_on: Option<String>,
        fetched: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn new(responses: &[(&str, &[&str])]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(d, urls)| {
                        (d.to_string(), urls.iter().map(|u| u.to_string()).collect())
                    })
                    .collect(),
                fail_on: None,
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(date: &str) -> Self {
            let mut stub = Self::new(&[]);
            stub.fail_on = Some(date.to_string());
            stub
        }

        fn fetched_dates(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PhotoSource for StubSource {
        async fn fetch_photos(
            &self,
            _rover: &str,
            _camera: &str,
            date: NaiveDate,
        ) -> Result<Vec<Photo>, PhotoError> {
            let key = date.format(DATE_FORMAT).to_string();
            if self.fail_on.as_deref() == Some(key.as_str()) {
                return Err(PhotoError::Parse("stubbed fetch failure".to_string()));
            }
            self.fetched.lock().unwrap().push(key.clone());
            let urls = self.responses.get(&key).cloned().unwrap_or_default();
            Ok(urls.iter().map(|u| photo(u, &key)).collect())
        }
    }

    #[test]
    fn test_add_image_admits_first_url_unconditionally() {
        let mut response = WindowResponse::new();
        response.add_image("2024-01-01", "a");

        assert_eq!(response.get("2024-01-01").unwrap(), ["a"]);
    }

    #[test]
    fn test_add_image_caps_at_three_per_date() {
        let mut response = WindowResponse::new();
        for url in ["a", "b", "c", "d"] {
            response.add_image("2024-01-01", url);
        }

        // The fourth candidate is silently dropped
        assert_eq!(response.get("2024-01-01").unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn test_add_image_caps_dates_independently() {
        let mut response = WindowResponse::new();
        for url in ["a", "b", "c", "d"] {
            response.add_image("2024-01-01", url);
        }
        response.add_image("2024-01-02", "e");

        assert_eq!(response.get("2024-01-01").unwrap(), ["a", "b", "c"]);
        assert_eq!(response.get("2024-01-02").unwrap(), ["e"]);
    }

    #[test]
    fn test_response_serializes_as_date_keyed_object() {
        let mut response = WindowResponse::new();
        response.add_image("2024-01-01", "u1");
        response.add_image("2024-01-10", "u2");
        response.add_image("2024-01-10", "u3");

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"2024-01-01":["u1"],"2024-01-10":["u2","u3"]}"#
        );
    }

    #[test]
    fn test_window_dates_are_ten_consecutive_days_ending_today() {
        let dates = window_dates(date("2024-01-10"));

        assert_eq!(dates.len(), 10);
        assert_eq!(dates[0], date("2024-01-01"));
        assert_eq!(dates[9], date("2024-01-10"));
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn test_window_dates_cross_month_boundaries() {
        let dates = window_dates(date("2024-03-05"));

        assert_eq!(dates[0], date("2024-02-25"));
        assert_eq!(dates[9], date("2024-03-05"));
    }

    #[tokio::test]
    async fn test_cached_dates_are_not_fetched() {
        let mut cache = ImageCache::new();
        cache.initialize("curiosity", "NAVCAM");
        cache.put("curiosity", "NAVCAM", "2024-01-05", "x");
        cache.put("curiosity", "NAVCAM", "2024-01-05", "y");

        let stub = StubSource::new(&[]);
        let response =
            assemble_window(&mut cache, &stub, "curiosity", "NAVCAM", date("2024-01-10"))
                .await
                .unwrap();

        // The cached date is served from the cache, in stored order
        assert_eq!(response.get("2024-01-05").unwrap(), ["x", "y"]);
        assert!(!stub.fetched_dates().contains(&"2024-01-05".to_string()));
        // The other nine dates all went to the source
        assert_eq!(stub.fetched_dates().len(), 9);
    }

    #[tokio::test]
    async fn test_every_window_date_is_resolved_once() {
        let mut cache = ImageCache::new();
        cache.initialize("curiosity", "NAVCAM");

        let stub = StubSource::new(&[]);
        assemble_window(&mut cache, &stub, "curiosity", "NAVCAM", date("2024-01-10"))
            .await
            .unwrap();

        let fetched = stub.fetched_dates();
        assert_eq!(fetched.len(), 10);
        assert_eq!(fetched[0], "2024-01-01");
        assert_eq!(fetched[9], "2024-01-10");
    }

    #[tokio::test]
    async fn test_fetched_urls_are_cached_and_capped_in_response() {
        let mut cache = ImageCache::new();
        cache.initialize("curiosity", "NAVCAM");

        let stub = StubSource::new(&[
            ("2024-01-01", &["u1"][..]),
            ("2024-01-10", &["u2", "u3", "u4", "u5"][..]),
        ]);
        let response =
            assemble_window(&mut cache, &stub, "curiosity", "NAVCAM", date("2024-01-10"))
                .await
                .unwrap();

        // Response is capped at three URLs per date
        assert_eq!(response.get("2024-01-01").unwrap(), ["u1"]);
        assert_eq!(response.get("2024-01-10").unwrap(), ["u2", "u3", "u4"]);
        assert_eq!(response.len(), 2);
        // Dates with no photos stay absent from the response
        assert!(response.get("2024-01-02").is_none());

        // The cache holds every fetched URL, past the response cap
        assert_eq!(
            cache.lookup("curiosity", "NAVCAM", "2024-01-10").unwrap(),
            ["u2", "u3", "u4", "u5"]
        );
        assert_eq!(
            cache.lookup("curiosity", "NAVCAM", "2024-01-01").unwrap(),
            ["u1"]
        );
        // Empty fetch results create no cache entry
        assert!(cache.lookup("curiosity", "NAVCAM", "2024-01-02").is_none());
    }

    #[tokio::test]
    async fn test_cached_urls_beyond_cap_are_dropped_from_response() {
        let mut cache = ImageCache::new();
        cache.initialize("curiosity", "NAVCAM");
        for url in ["a", "b", "c", "d", "e"] {
            cache.put("curiosity", "NAVCAM", "2024-01-10", url);
        }

        let stub = StubSource::new(&[]);
        let response =
            assemble_window(&mut cache, &stub, "curiosity", "NAVCAM", date("2024-01-10"))
                .await
                .unwrap();

        assert_eq!(response.get("2024-01-10").unwrap(), ["a", "b", "c"]);
        // The cache itself is never truncated
        assert_eq!(
            cache.lookup("curiosity", "NAVCAM", "2024-01-10").unwrap().len(),
            5
        );
    }

    #[tokio::test]
    async fn test_fetch_error_aborts_the_whole_window() {
        let mut cache = ImageCache::new();
        cache.initialize("curiosity", "NAVCAM");

        let stub = StubSource::failing_on("2024-01-06");
        let result =
            assemble_window(&mut cache, &stub, "curiosity", "NAVCAM", date("2024-01-10"))
                .await;

        assert!(result.is_err());
        // Only the dates before the failure were attempted
        let fetched = stub.fetched_dates();
        assert_eq!(fetched.last().unwrap(), "2024-01-05");
    }

    #[tokio::test]
    async fn test_empty_window_produces_empty_response() {
        let mut cache = ImageCache::new();
        cache.initialize("curiosity", "NAVCAM");

        let stub = StubSource::new(&[]);
        let response =
            assemble_window(&mut cache, &stub, "curiosity", "NAVCAM", date("2024-01-10"))
                .await
                .unwrap();

        assert!(response.is_empty());
    }
}
