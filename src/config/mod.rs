//! Configuration management for the diary tool.
//!
//! Settings are layered: built-in defaults, then the JSON config file, then
//! environment variables. The resulting [`Config`] is passed explicitly to the
//! note store client and the entry composer.
//!
//! # Environment Variables
//!
//! - `JOPLIN_DIARY_CONFIG`: Path to the config file (defaults to ~/.config/joplin-diary/config.json)
//! - `JOPLIN_DIARY_TOKEN`: Joplin Web Clipper API token
//! - `JOPLIN_DIARY_BASE_URL`: Data API address (defaults to http://localhost:41184)
//! - `JOPLIN_DIARY_FOLDER_ID`: Id of the notebook holding diary entries
//! - `JOPLIN_DIARY_DEFAULT_LOCATION`: Location used when GPS is unavailable
//! - `JOPLIN_DIARY_WEATHER_URL`: Weather text service host (defaults to wttr.in)
//! - `JOPLIN_DIARY_LOCATION_HELPER`: Path to the GPS location helper executable

use crate::constants;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the diary tool.
///
/// # Examples
///
/// ```
/// use joplin_diary::Config;
///
/// let config = Config {
///     token: "secret".to_string(),
///     folder_id: "3e68a3e8d7564e78b761dfe5162d637c".to_string(),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Joplin Web Clipper API token, sent with every request.
    pub token: String,

    /// Base URL of the Joplin data API.
    pub base_url: String,

    /// Id of the notebook that diary entries are filed in.
    pub folder_id: String,

    /// Location written into entries when GPS resolution is unavailable.
    pub default_location: String,

    /// Host (and optional scheme) of the weather text service.
    pub weather_url: String,

    /// Executable that prints the current GPS-derived location.
    pub location_helper: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &constants::REDACTED_PLACEHOLDER)
            .field("base_url", &self.base_url)
            .field("folder_id", &self.folder_id)
            .field("default_location", &self.default_location)
            .field("weather_url", &self.weather_url)
            .field("location_helper", &self.location_helper)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            token: String::new(),
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            folder_id: String::new(),
            default_location: constants::DEFAULT_LOCATION.to_string(),
            weather_url: constants::DEFAULT_WEATHER_URL.to_string(),
            location_helper: PathBuf::from(constants::DEFAULT_LOCATION_HELPER),
        }
    }
}

impl Config {
    /// Returns the config file path, honoring `JOPLIN_DIARY_CONFIG`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the path cannot be expanded.
    pub fn config_path() -> AppResult<PathBuf> {
        let raw = env::var(constants::ENV_VAR_CONFIG_PATH)
            .unwrap_or_else(|_| constants::DEFAULT_CONFIG_PATH.to_string());
        expand_path(&raw)
    }

    /// Loads configuration from the default config file and the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the config file is malformed or a path
    /// cannot be expanded.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use joplin_diary::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Filing entries in notebook {}", config.folder_id),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// Loads configuration from `path` (if it exists), then applies
    /// environment overrides.
    ///
    /// A missing file is not an error: defaults are used instead.
    pub fn load_from_path(path: &Path) -> AppResult<Self> {
        let mut config = if path.exists() {
            debug!("Reading config file {:?}", path);
            let raw = fs::read_to_string(path)?;
            serde_json::from_str::<Config>(&raw).map_err(|e| {
                AppError::Config(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            debug!("No config file at {:?}, using defaults", path);
            Config::default()
        };

        config.apply_env_overrides();

        let helper = config.location_helper.to_string_lossy().into_owned();
        config.location_helper = expand_path(&helper)?;

        Ok(config)
    }

    /// Overwrites fields with any matching environment variables that are set.
    fn apply_env_overrides(&mut self) {
        let overrides: [(&str, &mut String); 5] = [
            (constants::ENV_VAR_TOKEN, &mut self.token),
            (constants::ENV_VAR_BASE_URL, &mut self.base_url),
            (constants::ENV_VAR_FOLDER_ID, &mut self.folder_id),
            (constants::ENV_VAR_DEFAULT_LOCATION, &mut self.default_location),
            (constants::ENV_VAR_WEATHER_URL, &mut self.weather_url),
        ];

        for (key, field) in overrides {
            if let Ok(value) = env::var(key) {
                debug!("Config override from {}", key);
                *field = value;
            }
        }

        if let Ok(value) = env::var(constants::ENV_VAR_LOCATION_HELPER) {
            self.location_helper = PathBuf::from(value);
        }
    }

    /// Validates that the configuration is usable for talking to Joplin.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the token, folder id or default
    /// location is empty, or the base URL is not an http(s) URL.
    pub fn validate(&self) -> AppResult<()> {
        if self.token.trim().is_empty() {
            return Err(AppError::Config(format!(
                "API token is empty. Run with --setup or set {}",
                constants::ENV_VAR_TOKEN
            )));
        }

        if self.folder_id.trim().is_empty() {
            return Err(AppError::Config(format!(
                "Diary folder id is empty. Run with --setup or set {}",
                constants::ENV_VAR_FOLDER_ID
            )));
        }

        if self.default_location.trim().is_empty() {
            return Err(AppError::Config(
                "Default location cannot be empty".to_string(),
            ));
        }

        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            AppError::Config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// Writes the configuration as pretty JSON, creating parent directories.
    ///
    /// On unix the file is readable by its owner only, since it holds the token.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(
                path,
                fs::Permissions::from_mode(constants::CONFIG_FILE_PERMISSIONS),
            )?;
        }

        debug!("Saved config to {:?}", path);
        Ok(())
    }
}

/// Expands `~` and environment variable references in a path.
fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path '{}': {}", raw, e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
