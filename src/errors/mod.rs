//! Error handling utilities for the diary tool.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Weather and location lookups never produce errors: an unavailable source
//! simply falls through to the next one in its chain.

use thiserror::Error;

/// The rule of the entry layout that a body violated.
///
/// Produced when a composed body fails format validation. A composed entry
/// that fails here means the composer broke its own contract; it is not
/// something the operator can fix by changing their input.
///
/// # Examples
///
/// ```
/// use joplin_diary::errors::FormatError;
///
/// let error = FormatError::WeekdayMismatch {
///     expected: "Thursday".to_string(),
///     found: "Friday".to_string(),
/// };
/// assert!(format!("{}", error).contains("Thursday"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The body has fewer lines than the fixed header.
    #[error("Entry has {found} lines, expected at least {expected}")]
    TooShort {
        /// Minimum number of lines
        expected: usize,
        /// Number of lines present
        found: usize,
    },

    /// The first line is not the date title.
    #[error("Entry title line '{found}' does not match '{expected}'")]
    TitleMismatch {
        /// Expected `YYYY/MM/DD` title
        expected: String,
        /// Line actually present
        found: String,
    },

    /// The line after the title is not empty.
    #[error("Line after the title must be empty, found '{0}'")]
    MissingSeparator(String),

    /// The weather line is blank.
    #[error("Weather line is empty")]
    MissingWeather,

    /// The weekday line does not name the entry's weekday.
    #[error("Weekday line '{found}' does not match '{expected}'")]
    WeekdayMismatch {
        /// Expected weekday name
        expected: String,
        /// Line actually present
        found: String,
    },

    /// The location line is blank.
    #[error("Location line is empty")]
    MissingLocation,
}

/// Failures talking to the Joplin data API.
///
/// None of these are retried; they abort the current operation.
#[derive(Debug, Error)]
pub enum NoteStoreError {
    /// The service could not be reached at all.
    #[error("Joplin API unreachable: {0}. Is Joplin running with the Web Clipper service enabled?")]
    Unreachable(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Joplin API returned HTTP {status} for {endpoint}: {body}")]
    Http {
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Invalid response from Joplin: {0}")]
    InvalidResponse(String),
}

impl NoteStoreError {
    /// True when the service reported that the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NoteStoreError::Http { status: 404, .. })
    }
}

/// Represents all possible errors that can occur in the diary tool.
///
/// # Examples
///
/// ```
/// use joplin_diary::errors::AppError;
///
/// let error = AppError::Config("Missing API token".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing API token");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from the terminal or filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A date argument that is not `YYYY-MM-DD`.
    #[error("Invalid date format: '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    /// A composed entry failed format validation.
    #[error("Generated diary entry format is invalid: {0}")]
    Format(#[from] FormatError),

    /// Errors talking to the note store.
    #[error("Note store error: {0}")]
    NoteStore(#[from] NoteStoreError),

    /// The operator declined to overwrite an existing entry.
    #[error("Entry for {0} already exists and was not overwritten")]
    OverwriteDeclined(String),

    /// The operator interrupted an interactive prompt.
    #[error("Cancelled")]
    Cancelled,
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_from_format_error() {
        let app_error: AppError = FormatError::MissingWeather.into();
        assert!(matches!(
            app_error,
            AppError::Format(FormatError::MissingWeather)
        ));
        assert_eq!(
            format!("{}", app_error),
            "Generated diary entry format is invalid: Weather line is empty"
        );
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let date_error = AppError::InvalidDate("2024-13-01".to_string());
        assert!(format!("{}", date_error).contains("Invalid date format"));
        assert!(format!("{}", date_error).contains("2024-13-01"));

        let declined = AppError::OverwriteDeclined("2025/06/01".to_string());
        assert!(format!("{}", declined).contains("2025/06/01"));

        assert_eq!(format!("{}", AppError::Cancelled), "Cancelled");
    }

    #[test]
    fn test_note_store_http_error() {
        let error = NoteStoreError::Http {
            endpoint: "/notes/abc".to_string(),
            status: 404,
            body: String::new(),
        };
        assert!(error.is_not_found());
        assert!(format!("{}", error).contains("HTTP 404"));
        assert!(format!("{}", error).contains("/notes/abc"));

        let server_error = NoteStoreError::Http {
            endpoint: "/notes".to_string(),
            status: 500,
            body: "boom".to_string(),
        };
        assert!(!server_error.is_not_found());
    }

    #[test]
    fn test_format_error_messages() {
        let error = FormatError::TooShort {
            expected: 6,
            found: 3,
        };
        assert_eq!(
            format!("{}", error),
            "Entry has 3 lines, expected at least 6"
        );

        let error = FormatError::TitleMismatch {
            expected: "2025/01/01".to_string(),
            found: "2025-01-01".to_string(),
        };
        assert!(format!("{}", error).contains("2025-01-01"));
    }
}
