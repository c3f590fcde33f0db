//! Weather lookup capability consumed by weather agents
//!
//! Lookups return display text rather than structured data. Failures are
//! reported in the text itself ("not found", "Error fetching ..."), and
//! [`ToolReport`] is the single place that sniffs those markers.

use async_trait::async_trait;

pub mod codes;
pub mod open_meteo;

pub use codes::describe_weather_code;
pub use open_meteo::OpenMeteoClient;

/// Smallest forecast window, in days
pub const MIN_FORECAST_DAYS: u8 = 1;

/// Largest forecast window, in days
pub const MAX_FORECAST_DAYS: u8 = 7;

/// Forecast window used when the user does not ask for one
pub const DEFAULT_FORECAST_DAYS: u8 = 3;

/// Clamp a requested forecast length to `[1, 7]`
pub fn clamp_forecast_days(days: i64) -> u8 {
    days.clamp(MIN_FORECAST_DAYS as i64, MAX_FORECAST_DAYS as i64) as u8
}

/// A place to look weather up for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    /// Optional ISO country code used to disambiguate the city
    pub country: Option<String>,
}

impl LocationQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

/// Weather data source
///
/// Both lookups are infallible at the type level: resolution and transport
/// failures come back as descriptive, user-displayable text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Current conditions for a location
    async fn current_weather(&self, location: &LocationQuery) -> String;

    /// Daily forecast for a location; `days` is clamped to `[1, 7]`
    async fn forecast(&self, location: &LocationQuery, days: u8) -> String;
}

/// Classification of a lookup's text result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolReport {
    Success(String),
    Failure(String),
}

impl ToolReport {
    /// Classify lookup text by the failure markers lookups embed
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.contains("Error") || text.contains("not found") {
            ToolReport::Failure(text)
        } else {
            ToolReport::Success(text)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolReport::Success(_))
    }

    pub fn into_text(self) -> String {
        match self {
            ToolReport::Success(text) | ToolReport::Failure(text) => text,
        }
    }
}
