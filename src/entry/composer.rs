//! Entry composition: resolve location and weather, lay out the body, validate.

use super::DiaryEntry;
use crate::config::Config;
use crate::errors::AppResult;
use crate::prompt::OperatorPrompt;
use crate::resolve::{
    select_location_provider, CurlWeatherSource, LocationProvider, OverrideProvider,
    WeatherResolver,
};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Builds validated [`DiaryEntry`] values.
///
/// The location provider is chosen once, when the composer is built; the
/// operator prompt is only used when every weather source fails.
pub struct EntryComposer<'a> {
    weather: WeatherResolver,
    location: Box<dyn LocationProvider>,
    prompt: &'a dyn OperatorPrompt,
}

impl<'a> EntryComposer<'a> {
    pub fn new(
        weather: WeatherResolver,
        location: Box<dyn LocationProvider>,
        prompt: &'a dyn OperatorPrompt,
    ) -> Self {
        Self {
            weather,
            location,
            prompt,
        }
    }

    /// Creates a composer backed by curl for weather and the platform's
    /// location provider.
    pub fn from_config(config: &Config, prompt: &'a dyn OperatorPrompt) -> Self {
        let weather = WeatherResolver::new(
            Box::new(CurlWeatherSource::new(config.weather_url.clone())),
            config.default_location.clone(),
        );
        Self::new(weather, select_location_provider(config), prompt)
    }

    /// Composes the entry for `date`.
    ///
    /// A non-blank `location_override` is used verbatim instead of resolving
    /// the location. The resolved location is passed to the weather lookup as
    /// a hint.
    ///
    /// # Errors
    ///
    /// - `AppError::Cancelled` if the operator aborts manual weather entry
    /// - `AppError::Format` if the assembled body breaks the entry layout
    pub fn compose(
        &self,
        date: NaiveDate,
        user_content: &str,
        location_override: Option<&str>,
    ) -> AppResult<DiaryEntry> {
        let (location, source) = match location_override.filter(|o| !o.trim().is_empty()) {
            Some(value) => OverrideProvider::new(value).resolve(),
            None => self.location.resolve(),
        };
        debug!("Location {:?} ({})", location, source);

        let weather = self.weather.resolve(Some(location.as_str()), self.prompt)?;

        let entry = DiaryEntry::build(date, &weather, &location, source, user_content);
        entry.validate()?;

        info!(
            title = %entry.title,
            lines = entry.body_lines.len(),
            location_source = %source,
            "Composed diary entry"
        );
        Ok(entry)
    }
}
