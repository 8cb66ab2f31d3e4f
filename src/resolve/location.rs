//! Location providers.
//!
//! Which provider is used is decided once at startup by
//! [`select_location_provider`]: the GPS helper on macOS when it is
//! installed, the configured default everywhere else. An operator override
//! bypasses both.

use super::{is_valid_location, run_with_timeout};
use crate::config::Config;
use crate::constants;
use crate::entry::LocationSource;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Produces the location line for an entry.
pub trait LocationProvider {
    /// Returns the location and where it came from. Never fails.
    fn resolve(&self) -> (String, LocationSource);
}

/// Always answers with the configured default location.
#[derive(Debug, Clone)]
pub struct DefaultProvider {
    location: String,
}

impl DefaultProvider {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl LocationProvider for DefaultProvider {
    fn resolve(&self) -> (String, LocationSource) {
        (self.location.clone(), LocationSource::Default)
    }
}

/// First line of `text`, trimmed. A location is one body line, so anything
/// after a line break is dropped.
fn first_line(text: &str) -> String {
    text.trim().lines().next().unwrap_or_default().trim().to_string()
}

/// Answers with an operator-supplied location, verbatim apart from
/// surrounding whitespace and anything past the first line.
#[derive(Debug, Clone)]
pub struct OverrideProvider {
    location: String,
}

impl OverrideProvider {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl LocationProvider for OverrideProvider {
    fn resolve(&self) -> (String, LocationSource) {
        (first_line(&self.location), LocationSource::Override)
    }
}

/// Asks an external helper executable for the GPS-derived location.
///
/// The helper must print a single line on stdout and exit 0; only the first
/// line of its output is used. Anything else
/// (missing binary, timeout, non-zero exit, implausible output such as a
/// permission error) silently yields the default location instead.
#[derive(Debug, Clone)]
pub struct GpsHelperProvider {
    helper: PathBuf,
    timeout: Duration,
    fallback: DefaultProvider,
}

impl GpsHelperProvider {
    pub fn new(helper: impl Into<PathBuf>, fallback: DefaultProvider) -> Self {
        Self {
            helper: helper.into(),
            timeout: constants::LOCATION_HELPER_TIMEOUT,
            fallback,
        }
    }

    /// Replaces the default 15-second helper timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl LocationProvider for GpsHelperProvider {
    fn resolve(&self) -> (String, LocationSource) {
        let output = run_with_timeout(&self.helper, &[] as &[&str], self.timeout);
        match output.as_deref().map(first_line) {
            Some(location) if is_valid_location(&location) => {
                info!("Location resolved from GPS helper");
                (location, LocationSource::Gps)
            }
            Some(rejected) => {
                debug!("Rejected location helper output {:?}", rejected);
                self.fallback.resolve()
            }
            None => {
                debug!("Location helper unavailable, using default");
                self.fallback.resolve()
            }
        }
    }
}

/// Picks the location provider for this run.
///
/// The GPS helper is only used on macOS, and only when the configured helper
/// file exists.
pub fn select_location_provider(config: &Config) -> Box<dyn LocationProvider> {
    let fallback = DefaultProvider::new(config.default_location.clone());

    if cfg!(target_os = "macos") && config.location_helper.is_file() {
        debug!("Using GPS helper at {:?}", config.location_helper);
        Box::new(GpsHelperProvider::new(
            config.location_helper.clone(),
            fallback,
        ))
    } else {
        debug!("GPS helper not available, using default location");
        Box::new(fallback)
    }
}
