//! Diary entry layout and validation.
//!
//! Every entry body starts with six fixed lines followed by free-form content:
//!
//! ```text
//! 2025/06/01        <- title (date as YYYY/MM/DD)
//!                   <- empty
//! Partly cloudy +14°C
//! Sunday
//! Galway
//!                   <- empty
//! - went for a swim
//! ```
//!
//! This module holds the pure parts: building that layout from already
//! resolved values and checking a body against it. [`composer`] wires in the
//! weather and location resolvers.

pub mod composer;


pub use composer::EntryComposer;

use crate::constants;
use crate::errors::FormatError;
use chrono::NaiveDate;
use std::fmt;

/// Where the location line of an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    /// Reported by the GPS location helper.
    Gps,
    /// The configured default location.
    Default,
    /// Supplied by the operator with `--location`.
    Override,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LocationSource::Gps => "GPS",
            LocationSource::Default => "default",
            LocationSource::Override => "override",
        };
        f.write_str(label)
    }
}

/// A fully composed diary entry, ready to be written to the note store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryEntry {
    /// Calendar date of the entry.
    pub date: NaiveDate,
    /// Note title, the date as `YYYY/MM/DD`.
    pub title: String,
    /// Weather description on line 2.
    pub weather_line: String,
    /// Weekday name on line 3.
    pub day_name: String,
    /// Location on line 4.
    pub location: String,
    /// Where `location` came from.
    pub location_source: LocationSource,
    /// Every line of the body, header included.
    pub body_lines: Vec<String>,
}

impl DiaryEntry {
    /// Assembles the entry layout from resolved values.
    ///
    /// Non-blank `user_content` is split on newlines and appended verbatim,
    /// leading tabs and dashes included. Blank content is replaced by three
    /// `"- "` template bullets.
    pub fn build(
        date: NaiveDate,
        weather: &str,
        location: &str,
        location_source: LocationSource,
        user_content: &str,
    ) -> Self {
        let title = format_title(date);
        let day_name = weekday_name(date);

        let mut body_lines = vec![
            title.clone(),
            String::new(),
            weather.to_string(),
            day_name.clone(),
            location.to_string(),
            String::new(),
        ];

        if user_content.trim().is_empty() {
            body_lines.extend(
                std::iter::repeat(constants::TEMPLATE_BULLET.to_string())
                    .take(constants::TEMPLATE_BULLET_COUNT),
            );
        } else {
            body_lines.extend(user_content.split('\n').map(str::to_string));
        }

        DiaryEntry {
            date,
            title,
            weather_line: weather.to_string(),
            day_name,
            location: location.to_string(),
            location_source,
            body_lines,
        }
    }

    /// The body text as stored in the note: all lines joined with `\n`.
    pub fn body(&self) -> String {
        self.body_lines.join("\n")
    }

    /// Checks the entry's own body against the layout rules.
    pub fn validate(&self) -> Result<(), FormatError> {
        validate_format(&self.body(), self.date)
    }
}

/// Formats `date` as a note title, `YYYY/MM/DD`.
pub fn format_title(date: NaiveDate) -> String {
    date.format(constants::TITLE_DATE_FORMAT).to_string()
}

/// Full English weekday name for `date`, e.g. `Thursday`.
pub fn weekday_name(date: NaiveDate) -> String {
    date.format(constants::WEEKDAY_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` command-line date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, constants::DATE_FORMAT_ISO)
}

/// Checks a body against the entry layout, reporting the first broken rule.
///
/// Line 5 (the separator before free-form content) is deliberately not
/// checked; entries with text there have always been accepted.
pub fn validate_format(body: &str, date: NaiveDate) -> Result<(), FormatError> {
    let lines: Vec<&str> = body.split('\n').collect();

    if lines.len() < constants::HEADER_LINE_COUNT {
        return Err(FormatError::TooShort {
            expected: constants::HEADER_LINE_COUNT,
            found: lines.len(),
        });
    }

    let expected_title = format_title(date);
    if lines[0] != expected_title {
        return Err(FormatError::TitleMismatch {
            expected: expected_title,
            found: lines[0].to_string(),
        });
    }

    if !lines[1].is_empty() {
        return Err(FormatError::MissingSeparator(lines[1].to_string()));
    }

    if lines[2].trim().is_empty() {
        return Err(FormatError::MissingWeather);
    }

    let expected_day = weekday_name(date);
    if lines[3] != expected_day {
        return Err(FormatError::WeekdayMismatch {
            expected: expected_day,
            found: lines[3].to_string(),
        });
    }

    if lines[4].trim().is_empty() {
        return Err(FormatError::MissingLocation);
    }

    Ok(())
}

/// Boolean form of [`validate_format`].
pub fn is_valid_format(body: &str, date: NaiveDate) -> bool {
    validate_format(body, date).is_ok()
}
