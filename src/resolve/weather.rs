//! Weather lookup with a fixed fallback chain.
//!
//! The chain is: detailed format (location-qualified when the location
//! differs from the default), terse format with the same qualifier, then the
//! detailed format without a qualifier. When every automatic attempt fails
//! the operator is asked to type the weather in.

use super::{is_valid_weather, run_with_timeout};
use crate::constants;
use crate::errors::AppResult;
use crate::prompt::OperatorPrompt;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info};

/// The two reply formats requested from the weather service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherFormat {
    /// Condition and temperature, e.g. `Partly cloudy +14°C`.
    Detailed,
    /// One-line report, e.g. `Cork: ⛅️ +14°C`.
    Terse,
}

impl WeatherFormat {
    /// The `format` query value for this variant.
    pub fn query_value(self) -> &'static str {
        match self {
            WeatherFormat::Detailed => constants::WEATHER_FORMAT_DETAILED,
            WeatherFormat::Terse => constants::WEATHER_FORMAT_TERSE,
        }
    }

    /// How long to wait for a reply in this format.
    pub fn timeout(self) -> Duration {
        match self {
            WeatherFormat::Detailed => constants::WEATHER_DETAILED_TIMEOUT,
            WeatherFormat::Terse => constants::WEATHER_TERSE_TIMEOUT,
        }
    }

    /// Turns a raw reply into a weather line.
    ///
    /// Terse replies are prefixed with the place name; only the text after
    /// the first colon is kept.
    pub fn extract(self, reply: &str) -> String {
        let reply = reply.trim();
        match self {
            WeatherFormat::Detailed => reply.to_string(),
            WeatherFormat::Terse => match reply.split_once(':') {
                Some((_, rest)) => rest.trim().to_string(),
                None => reply.to_string(),
            },
        }
    }
}

/// One attempt in the weather chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    /// Reply format to request.
    pub format: WeatherFormat,
    /// Place to ask about; `None` lets the service geolocate the caller.
    pub location: Option<String>,
}

/// Something that can answer a [`WeatherQuery`].
pub trait WeatherSource {
    /// Returns the raw reply, or `None` when the source is unavailable.
    fn fetch(&self, query: &WeatherQuery) -> Option<String>;
}

/// Queries a wttr.in-style text service through `curl`.
#[derive(Debug, Clone)]
pub struct CurlWeatherSource {
    base_url: String,
}

impl CurlWeatherSource {
    /// Creates a source for the service at `base_url` (e.g. `wttr.in`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Builds the request URL for `query`.
    ///
    /// The location becomes a single path segment: spaces are replaced by `+`
    /// and everything else that is not allowed in a segment is
    /// percent-encoded. A base URL without a scheme is taken as `http://`.
    /// Returns `None` if the base URL cannot be parsed.
    pub fn url_for(&self, query: &WeatherQuery) -> Option<String> {
        let base = self.base_url.trim().trim_end_matches('/');
        let base = if base.contains("://") {
            base.to_string()
        } else {
            format!("http://{}", base)
        };

        let mut url = match Url::parse(&base) {
            Ok(url) => url,
            Err(e) => {
                debug!("Unusable weather URL {:?}: {}", self.base_url, e);
                return None;
            }
        };

        if let Some(location) = query.location.as_deref() {
            let place = location.trim().replace(' ', "+");
            url.path_segments_mut().ok()?.pop_if_empty().push(&place);
        }
        url.set_query(Some(&format!("format={}", query.format.query_value())));

        Some(url.into())
    }
}

impl WeatherSource for CurlWeatherSource {
    fn fetch(&self, query: &WeatherQuery) -> Option<String> {
        let url = self.url_for(query)?;
        let timeout = query.format.timeout();
        let max_time = timeout.as_secs().to_string();
        debug!("Fetching weather from {}", url);
        // curl enforces its own limit; the process timeout is a backstop.
        run_with_timeout(
            "curl",
            &["-s", "--max-time", max_time.as_str(), url.as_str()],
            timeout + Duration::from_secs(1),
        )
    }
}

/// Resolves the weather line for an entry.
pub struct WeatherResolver {
    source: Box<dyn WeatherSource>,
    default_location: String,
}

impl WeatherResolver {
    /// Creates a resolver; `default_location` is never used as a qualifier.
    pub fn new(source: Box<dyn WeatherSource>, default_location: impl Into<String>) -> Self {
        Self {
            source,
            default_location: default_location.into(),
        }
    }

    /// The ordered attempts made for `location_hint`.
    ///
    /// The hint qualifies the first two queries only when it is non-blank
    /// and differs from the default location. The unqualified retry is only
    /// added when the earlier attempts were qualified, since otherwise it
    /// would repeat the first query verbatim.
    pub fn attempts(&self, location_hint: Option<&str>) -> Vec<WeatherQuery> {
        let qualifier = location_hint
            .map(str::trim)
            .filter(|hint| !hint.is_empty() && *hint != self.default_location.trim())
            .map(str::to_string);

        let mut attempts = vec![
            WeatherQuery {
                format: WeatherFormat::Detailed,
                location: qualifier.clone(),
            },
            WeatherQuery {
                format: WeatherFormat::Terse,
                location: qualifier.clone(),
            },
        ];

        if qualifier.is_some() {
            attempts.push(WeatherQuery {
                format: WeatherFormat::Detailed,
                location: None,
            });
        }

        attempts
    }

    /// Returns the first valid weather line from the chain.
    ///
    /// Falls back to asking the operator; their answer is trimmed and used
    /// as-is without validation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cancelled` if the operator aborts the manual prompt.
    pub fn resolve(
        &self,
        location_hint: Option<&str>,
        prompt: &dyn OperatorPrompt,
    ) -> AppResult<String> {
        for query in self.attempts(location_hint) {
            let Some(reply) = self.source.fetch(&query) else {
                debug!("Weather query {:?} unavailable", query);
                continue;
            };

            let line = query.format.extract(&reply);
            if is_valid_weather(&line) {
                info!("Weather resolved via {:?} query", query.format);
                return Ok(line);
            }
            debug!("Rejected weather reply {:?} for {:?}", reply, query);
        }

        info!("All weather sources failed, asking operator");
        let answer = prompt.ask("Enter weather description (e.g., 'Mild, rainy. 11C'): ")?;
        Ok(answer.trim().to_string())
    }
}
