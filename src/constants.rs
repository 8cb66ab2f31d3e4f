//! Constants used throughout the application.
//!
//! This module contains all constants used in the diary tool, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

use std::time::Duration;

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "joplin-diary";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Compose a daily diary entry and file it in Joplin";

// Logging
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level when `--verbose` is not given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used with `--verbose`.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable pointing at an alternative config file.
pub const ENV_VAR_CONFIG_PATH: &str = "JOPLIN_DIARY_CONFIG";
/// Environment variable overriding the API token.
pub const ENV_VAR_TOKEN: &str = "JOPLIN_DIARY_TOKEN";
/// Environment variable overriding the data API base URL.
pub const ENV_VAR_BASE_URL: &str = "JOPLIN_DIARY_BASE_URL";
/// Environment variable overriding the diary notebook id.
pub const ENV_VAR_FOLDER_ID: &str = "JOPLIN_DIARY_FOLDER_ID";
/// Environment variable overriding the default location.
pub const ENV_VAR_DEFAULT_LOCATION: &str = "JOPLIN_DIARY_DEFAULT_LOCATION";
/// Environment variable overriding the weather service host.
pub const ENV_VAR_WEATHER_URL: &str = "JOPLIN_DIARY_WEATHER_URL";
/// Environment variable overriding the location helper path.
pub const ENV_VAR_LOCATION_HELPER: &str = "JOPLIN_DIARY_LOCATION_HELPER";
/// Environment variable selecting the log output format.
pub const ENV_VAR_LOG_FORMAT: &str = "JOPLIN_DIARY_LOG_FORMAT";

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/joplin-diary/config.json";
/// Default Joplin Web Clipper service address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:41184";
/// Location used when nothing better is known.
pub const DEFAULT_LOCATION: &str = "Home";
/// Default weather text service.
pub const DEFAULT_WEATHER_URL: &str = "wttr.in";
/// Default path of the GPS location helper.
pub const DEFAULT_LOCATION_HELPER: &str = "~/.config/joplin-diary/location-helper";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";
/// POSIX permissions for the written config file (owner read/write).
#[cfg(unix)]
pub const CONFIG_FILE_PERMISSIONS: u32 = 0o600;

// Entry Layout
/// Date format accepted on the command line.
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format used for note titles and the first body line.
pub const TITLE_DATE_FORMAT: &str = "%Y/%m/%d";
/// Weekday name format used on the fourth body line.
pub const WEEKDAY_FORMAT: &str = "%A";
/// Date format used in the "Creating diary entry for ..." banner.
pub const BANNER_DATE_FORMAT: &str = "%A, %B %d, %Y";
/// Number of fixed header lines preceding user content.
pub const HEADER_LINE_COUNT: usize = 6;
/// Bullet line inserted when no content was supplied.
pub const TEMPLATE_BULLET: &str = "- ";
/// Number of template bullets inserted when no content was supplied.
pub const TEMPLATE_BULLET_COUNT: usize = 3;

// Resolution
/// Longest weather description accepted from an automatic source.
pub const MAX_WEATHER_LEN: usize = 100;
/// Longest location accepted from the GPS helper.
pub const MAX_LOCATION_LEN: usize = 50;
/// Substrings that mark a weather reply as an error page.
pub const WEATHER_ERROR_INDICATORS: &[&str] = &["error", "unknown", "not found", "404"];
/// Substrings that mark a location reply as unusable.
pub const LOCATION_ERROR_INDICATORS: &[&str] =
    &["error", "unknown", "not found", "404", "null", "undefined"];
/// Detailed weather format (condition and temperature).
pub const WEATHER_FORMAT_DETAILED: &str = "%C+%t";
/// Terse one-line weather format.
pub const WEATHER_FORMAT_TERSE: &str = "3";
/// Timeout for the detailed weather query.
pub const WEATHER_DETAILED_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the terse weather query.
pub const WEATHER_TERSE_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for the GPS location helper.
pub const LOCATION_HELPER_TIMEOUT: Duration = Duration::from_secs(15);

// Self-test
/// Far-future date used for the end-to-end self-test note.
pub const SELF_TEST_DATE: (i32, u32, u32) = (2099, 12, 31);
/// Content written into the self-test note.
pub const SELF_TEST_CONTENT: &str =
    "- Integration test entry\n- Testing automatic weather fetch\n- This will be deleted";
/// Content used for dry-run edge-case composition.
pub const EDGE_CASE_CONTENT: &str = "- Edge case test";
