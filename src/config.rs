//! Configuration loading for the Mars Rover Images CLI
//!
//! Settings are resolved in layers: built-in defaults at the bottom, then an
//! optional YAML config file, then environment variables, then explicit
//! command-line flag overrides on top. Environment variables matching a
//! known key (e.g. `ROVER_NAME`) are consulted automatically.

use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};
use directories::BaseDirs;
use thiserror::Error;
use tracing::debug;

/// Default rover queried when no override is configured
pub const DEFAULT_ROVER: &str = "curiosity";

/// Default camera queried when no override is configured
pub const DEFAULT_CAMERA: &str = "NAVCAM";

/// File name of the cache in the user's home directory
const DEFAULT_CACHE_FILE: &str = ".rover-images.cache";

/// File name of the config file searched for in the user's home directory
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Recognized configuration keys
const CACHE_FILE_KEY: &str = "cache_file";
const ROVER_NAME_KEY: &str = "rover_name";
const CAMERA_NAME_KEY: &str = "camera_name";

/// Errors that can occur while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory could be determined for default paths
    #[error("could not determine home directory")]
    NoHomeDir,

    /// Reading or merging a configuration source failed
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Resolved configuration for a single run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Location of the persisted image cache
    pub cache_file: PathBuf,
    /// Name of the rover to get images from
    pub rover: String,
    /// Name of the camera to get images from
    pub camera: String,
}

impl Settings {
    /// Loads settings using the user's home directory for default paths and
    /// the process environment for overrides
    ///
    /// Flags passed here (from the CLI) take precedence over environment
    /// variables, which take precedence over the config file.
    pub fn load(
        file: Option<&Path>,
        rover: Option<&str>,
        camera: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDir)?;
        Self::load_from(
            base_dirs.home_dir(),
            file,
            rover,
            camera,
            Environment::default(),
        )
    }

    /// Loads settings with an explicit home directory and environment source
    ///
    /// Useful for testing or when a specific home location is needed.
    pub fn load_from(
        home: &Path,
        file: Option<&Path>,
        rover: Option<&str>,
        camera: Option<&str>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        let default_cache = home.join(DEFAULT_CACHE_FILE);

        let mut builder = config::Config::builder()
            .set_default(CACHE_FILE_KEY, default_cache.to_string_lossy().as_ref())?
            .set_default(ROVER_NAME_KEY, DEFAULT_ROVER)?
            .set_default(CAMERA_NAME_KEY, DEFAULT_CAMERA)?;

        // An explicitly flagged config file must exist; the default home
        // location is optional.
        builder = match file {
            Some(path) => {
                debug!(config = %path.display(), "using config file");
                builder.add_source(File::from(path).format(FileFormat::Yaml).required(true))
            }
            None => builder.add_source(
                File::from(home.join(DEFAULT_CONFIG_FILE))
                    .format(FileFormat::Yaml)
                    .required(false),
            ),
        };

        builder = builder.add_source(env);

        if let Some(rover) = rover {
            builder = builder.set_override(ROVER_NAME_KEY, rover)?;
        }
        if let Some(camera) = camera {
            builder = builder.set_override(CAMERA_NAME_KEY, camera)?;
        }

        let resolved = builder.build()?;

        Ok(Self {
            cache_file: PathBuf::from(resolved.get_string(CACHE_FILE_KEY)?),
            rover: resolved.get_string(ROVER_NAME_KEY)?,
            camera: resolved.get_string(CAMERA_NAME_KEY)?,
        })
    }
}
