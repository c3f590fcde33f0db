//! Open-Meteo weather client
//!
//! Uses the free geocoding and forecast APIs; no API key is required.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::protocol::error::A2AResult;

use super::{clamp_forecast_days, codes::describe_weather_code, LocationQuery, WeatherLookup};

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Per-call bound on outbound requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
weather_code,wind_speed_10m,precipitation";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code,precipitation_sum";

/// Failure while resolving or fetching weather
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City '{city}' not found. Please check the spelling.")]
    CityNotFound { city: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// One geocoding match
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeoLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub country_code: String,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeoLocation>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentReport {
    pub current: CurrentConditions,
    pub current_units: CurrentConditions,
}

/// Current conditions; the same shape carries values and their units
#[derive(Debug, Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: Value,
    pub relative_humidity_2m: Value,
    pub apparent_temperature: Value,
    pub weather_code: Value,
    pub wind_speed_10m: Value,
    pub precipitation: Value,
}

#[derive(Debug, Deserialize)]
pub struct DailyReport {
    pub daily: DailySeries,
    pub daily_units: DailyUnits,
}

#[derive(Debug, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Value>,
    pub temperature_2m_min: Vec<Value>,
    pub weather_code: Vec<Value>,
    pub precipitation_sum: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct DailyUnits {
    pub temperature_2m_max: String,
    pub temperature_2m_min: String,
    pub precipitation_sum: String,
}

/// Weather lookups against the Open-Meteo HTTP API
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoClient {
    /// Create a client with the default 10 second timeout
    pub fn new() -> A2AResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client bounding every outbound call by `timeout`
    pub fn with_timeout(timeout: Duration) -> A2AResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client))
    }

    /// Create a client with a custom reqwest client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
        }
    }

    /// Point the client at other geocoding/forecast endpoints
    pub fn with_endpoints(
        mut self,
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Self {
        self.geocoding_url = geocoding_url.into();
        self.forecast_url = forecast_url.into();
        self
    }

    /// Resolve a city (and optional country code) to coordinates
    pub async fn geocode(&self, location: &LocationQuery) -> Result<GeoLocation, WeatherError> {
        let response: GeocodingResponse = self
            .client
            .get(&self.geocoding_url)
            .query(&[
                ("name", location.city.as_str()),
                ("count", "5"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        pick_location(response.results, location.country.as_deref()).ok_or_else(|| {
            WeatherError::CityNotFound {
                city: location.city.clone(),
            }
        })
    }

    async fn fetch_current(&self, location: &LocationQuery) -> Result<String, WeatherError> {
        let place = self.geocode(location).await?;

        let report: CurrentReport = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(format_current(&place, &report))
    }

    async fn fetch_forecast(
        &self,
        location: &LocationQuery,
        days: u8,
    ) -> Result<String, WeatherError> {
        let place = self.geocode(location).await?;

        let report: DailyReport = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", days.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(format_forecast(&place, days, &report))
    }
}

#[async_trait]
impl WeatherLookup for OpenMeteoClient {
    async fn current_weather(&self, location: &LocationQuery) -> String {
        match self.fetch_current(location).await {
            Ok(text) => text,
            Err(WeatherError::Http(err)) => {
                tracing::warn!(city = %location.city, error = %err, "current weather request failed");
                format!("Error fetching weather data: {}", err)
            }
            Err(err) => err.to_string(),
        }
    }

    async fn forecast(&self, location: &LocationQuery, days: u8) -> String {
        let days = clamp_forecast_days(days as i64);
        match self.fetch_forecast(location, days).await {
            Ok(text) => text,
            Err(WeatherError::Http(err)) => {
                tracing::warn!(city = %location.city, error = %err, "forecast request failed");
                format!("Error fetching forecast data: {}", err)
            }
            Err(err) => err.to_string(),
        }
    }
}

/// Choose the geocoding result matching `country`, else the first result
pub fn pick_location(results: Vec<GeoLocation>, country: Option<&str>) -> Option<GeoLocation> {
    if let Some(country) = country.filter(|c| !c.is_empty()) {
        if let Some(found) = results
            .iter()
            .find(|r| r.country_code.eq_ignore_ascii_case(country))
        {
            return Some(found.clone());
        }
    }
    results.into_iter().next()
}

/// Render current conditions as display text
pub fn format_current(place: &GeoLocation, report: &CurrentReport) -> String {
    let now = &report.current;
    let units = &report.current_units;
    let conditions = now
        .weather_code
        .as_i64()
        .map(describe_weather_code)
        .unwrap_or("Unknown");

    format!(
        "Current Weather for {}, {}:\n\
         Conditions: {}\n\
         Temperature: {}{}\n\
         Feels Like: {}{}\n\
         Humidity: {}{}\n\
         Wind: {} {}\n\
         Precipitation: {} {}",
        place.name,
        place.country,
        conditions,
        display(&now.temperature_2m),
        display(&units.temperature_2m),
        display(&now.apparent_temperature),
        display(&units.apparent_temperature),
        display(&now.relative_humidity_2m),
        display(&units.relative_humidity_2m),
        display(&now.wind_speed_10m),
        display(&units.wind_speed_10m),
        display(&now.precipitation),
        display(&units.precipitation),
    )
}

/// Render a daily forecast as display text, one paragraph per day
pub fn format_forecast(place: &GeoLocation, days: u8, report: &DailyReport) -> String {
    let daily = &report.daily;
    let units = &report.daily_units;

    let mut text = format!("{}-Day Forecast for {}, {}:\n\n", days, place.name, place.country);
    for (i, date) in daily.time.iter().enumerate() {
        let conditions = daily
            .weather_code
            .get(i)
            .and_then(Value::as_i64)
            .map(describe_weather_code)
            .unwrap_or("Unknown");

        text.push_str(&format!(
            "{}: {}\n  High: {}{} / Low: {}{}\n  Precipitation: {} {}\n\n",
            date,
            conditions,
            cell(&daily.temperature_2m_max, i),
            units.temperature_2m_max,
            cell(&daily.temperature_2m_min, i),
            units.temperature_2m_min,
            cell(&daily.precipitation_sum, i),
            units.precipitation_sum,
        ));
    }

    text.trim().to_string()
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "n/a".to_string(),
        other => other.to_string(),
    }
}

fn cell(series: &[Value], i: usize) -> String {
    series.get(i).map(display).unwrap_or_else(|| "n/a".to_string())
}
