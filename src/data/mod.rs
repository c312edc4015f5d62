//! Data types for the NASA Mars Rover Photos API
//!
//! This module contains the wire types mirroring the JSON shapes returned by
//! the photos endpoint, and the client that queries it. Only `img_src` and
//! the query date feed response assembly; the remaining fields are transport
//! metadata carried as returned.

pub mod photos;

pub use photos::{PhotoClient, PhotoError, PhotoSource};

use serde::{Deserialize, Serialize};

/// Top-level response body from the photos endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotosResponse {
    /// Photo records for the queried rover, camera, and earth date
    pub photos: Vec<Photo>,
}

/// A single photo record returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    /// Mission day number the photo was taken on
    pub sol: i64,
    pub camera: CameraInfo,
    /// Source URL of the image
    pub img_src: String,
    /// Earth calendar date the photo was taken on (YYYY-MM-DD)
    pub earth_date: String,
    pub rover: RoverInfo,
}

/// Camera metadata attached to a photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraInfo {
    pub id: i64,
    pub name: String,
    pub rover_id: i64,
    pub full_name: String,
}

/// Rover metadata attached to a photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoverInfo {
    pub id: i64,
    pub name: String,
    pub landing_date: String,
    pub launch_date: String,
    pub status: String,
}
