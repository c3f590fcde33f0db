//! Weather agent answering from a [`WeatherLookup`]
//!
//! Intent is matched with plain keyword rules: forecast words select the
//! forecast lookup, anything else the current-conditions lookup, and the
//! location is the phrase following the last " in " (or " for ").

use std::sync::Arc;

use async_trait::async_trait;
use tower::BoxError;

use crate::weather::{
    clamp_forecast_days, LocationQuery, ToolReport, WeatherLookup, DEFAULT_FORECAST_DAYS,
    MAX_FORECAST_DAYS,
};

use super::AgentHandler;

/// Reply when no location can be found in the utterance
pub const HELP_REPLY: &str = "I can look up current weather and forecasts of up to 7 days. \
Try \"What's the weather in Tokyo?\" or \"5-day forecast for Paris\".";

const FORECAST_WORDS: [&str; 5] = ["forecast", "week", "tomorrow", "will it", "days"];

/// Words that end the location phrase
const LOCATION_TERMINATORS: [&str; 9] = [
    " for ", " this ", " next ", " over ", " during ", " today", " tomorrow", " right now",
    " now",
];

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherRequest {
    Current(LocationQuery),
    Forecast { location: LocationQuery, days: u8 },
}

impl WeatherRequest {
    /// Interpret a free-text utterance; `None` when it names no location
    pub fn from_utterance(text: &str) -> Option<Self> {
        let lower = text.to_ascii_lowercase();
        let location = extract_location(text)?;
        let days = requested_days(&lower);

        if days.is_some() || FORECAST_WORDS.iter().any(|word| lower.contains(word)) {
            let days = days.unwrap_or(if lower.contains("week") {
                MAX_FORECAST_DAYS
            } else {
                DEFAULT_FORECAST_DAYS
            });
            Some(WeatherRequest::Forecast { location, days })
        } else {
            Some(WeatherRequest::Current(location))
        }
    }
}

/// Handler serving weather questions for any configured agent
pub struct WeatherToolAgent {
    lookup: Arc<dyn WeatherLookup>,
}

impl WeatherToolAgent {
    pub fn new(lookup: Arc<dyn WeatherLookup>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl AgentHandler for WeatherToolAgent {
    async fn handle(&self, message: &str) -> Result<String, BoxError> {
        let Some(request) = WeatherRequest::from_utterance(message) else {
            return Ok(HELP_REPLY.to_string());
        };
        tracing::debug!(?request, "weather request");

        let text = match &request {
            WeatherRequest::Current(location) => self.lookup.current_weather(location).await,
            WeatherRequest::Forecast { location, days } => {
                self.lookup.forecast(location, *days).await
            }
        };

        let report = ToolReport::classify(text);
        if !report.is_success() {
            tracing::warn!(?request, "weather lookup reported a failure");
        }
        Ok(report.into_text())
    }
}

/// Explicit day count from "5-day", "5 day" or "5 days", clamped to `[1, 7]`
fn requested_days(lower: &str) -> Option<u8> {
    let words: Vec<&str> = lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '-'))
        .collect();

    words.iter().enumerate().find_map(|(i, word)| {
        let count = match word.split_once('-') {
            Some((n, unit)) if unit.starts_with("day") => n,
            _ if words.get(i + 1).is_some_and(|next| next.starts_with("day")) => *word,
            _ => return None,
        };
        count.parse::<i64>().ok().map(clamp_forecast_days)
    })
}

fn extract_location(text: &str) -> Option<LocationQuery> {
    // ASCII lowering keeps byte offsets aligned with `text`
    let lower = text.to_ascii_lowercase();
    let start = lower
        .rfind(" in ")
        .map(|i| i + " in ".len())
        .or_else(|| lower.rfind(" for ").map(|i| i + " for ".len()))?;

    let phrase = &text[start..];
    let phrase_lower = &lower[start..];
    let end = LOCATION_TERMINATORS
        .iter()
        .filter_map(|stop| phrase_lower.find(stop))
        .min()
        .unwrap_or(phrase.len());

    let phrase = phrase[..end]
        .trim()
        .trim_end_matches(|c: char| matches!(c, '?' | '!' | '.' | ';' | ':'))
        .trim();
    if phrase.is_empty() {
        return None;
    }

    match phrase.rsplit_once(',') {
        Some((city, country)) => {
            let city = city.trim();
            let country = country.trim();
            let query = LocationQuery::new(city);
            if (2..=3).contains(&country.len()) && country.chars().all(|c| c.is_ascii_alphabetic())
            {
                Some(query.with_country(country.to_ascii_uppercase()))
            } else {
                Some(query)
            }
        }
        None => Some(LocationQuery::new(phrase)),
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use crate::weather::MockWeatherLookup;

    use super::*;

    fn current(city: &str) -> Option<WeatherRequest> {
        Some(WeatherRequest::Current(LocationQuery::new(city)))
    }

    fn forecast(city: &str, days: u8) -> Option<WeatherRequest> {
        Some(WeatherRequest::Forecast {
            location: LocationQuery::new(city),
            days,
        })
    }

    #[test]
    fn test_current_weather_utterances() {
        assert_eq!(
            WeatherRequest::from_utterance("What's the weather in Tokyo?"),
            current("Tokyo")
        );
        assert_eq!(
            WeatherRequest::from_utterance("How hot is it in Dubai?"),
            current("Dubai")
        );
        assert_eq!(
            WeatherRequest::from_utterance("weather in Paris"),
            current("Paris")
        );
        assert_eq!(
            WeatherRequest::from_utterance("Current weather in London, UK"),
            Some(WeatherRequest::Current(
                LocationQuery::new("London").with_country("UK")
            ))
        );
    }

    #[test]
    fn test_forecast_utterances() {
        assert_eq!(
            WeatherRequest::from_utterance("What's the 5-day forecast for Paris?"),
            forecast("Paris", 5)
        );
        assert_eq!(
            WeatherRequest::from_utterance("Will it rain in Seattle this week?"),
            forecast("Seattle", 7)
        );
        assert_eq!(
            WeatherRequest::from_utterance("7-day forecast for Sydney"),
            forecast("Sydney", 7)
        );
        assert_eq!(
            WeatherRequest::from_utterance("weather in Oslo for the next 2 days"),
            forecast("Oslo", 2)
        );
        assert_eq!(
            WeatherRequest::from_utterance("forecast in Lima"),
            forecast("Lima", DEFAULT_FORECAST_DAYS)
        );
    }

    #[test]
    fn test_day_count_is_clamped() {
        assert_eq!(
            WeatherRequest::from_utterance("14-day forecast for Rome"),
            forecast("Rome", 7)
        );
        assert_eq!(
            WeatherRequest::from_utterance("0 day forecast for Rome"),
            forecast("Rome", 1)
        );
    }

    #[test]
    fn test_no_location() {
        assert_eq!(WeatherRequest::from_utterance("hello there"), None);
        assert_eq!(WeatherRequest::from_utterance("weather in ?"), None);
    }

    #[test]
    fn test_long_country_suffix_is_not_a_code() {
        assert_eq!(
            WeatherRequest::from_utterance("weather in Portland, Oregon"),
            current("Portland")
        );
    }

    #[tokio::test]
    async fn test_current_weather_lookup() {
        let mut lookup = MockWeatherLookup::new();
        lookup
            .expect_current_weather()
            .with(eq(LocationQuery::new("Paris")))
            .times(1)
            .returning(|_| "Current Weather for Paris, France:".to_string());

        let agent = WeatherToolAgent::new(Arc::new(lookup));
        let reply = agent.handle("weather in Paris").await.unwrap();
        assert_eq!(reply, "Current Weather for Paris, France:");
    }

    #[tokio::test]
    async fn test_forecast_lookup() {
        let mut lookup = MockWeatherLookup::new();
        lookup
            .expect_forecast()
            .withf(|location, days| location.city == "Sydney" && *days == 7)
            .times(1)
            .returning(|_, _| "7-Day Forecast for Sydney, Australia:".to_string());

        let agent = WeatherToolAgent::new(Arc::new(lookup));
        let reply = agent.handle("7-day forecast for Sydney").await.unwrap();
        assert!(reply.starts_with("7-Day Forecast"));
    }

    #[tokio::test]
    async fn test_lookup_failure_text_is_returned() {
        let mut lookup = MockWeatherLookup::new();
        lookup
            .expect_current_weather()
            .returning(|_| "City 'Atlantis' not found. Please check the spelling.".to_string());

        let agent = WeatherToolAgent::new(Arc::new(lookup));
        let reply = agent.handle("weather in Atlantis").await.unwrap();
        assert!(reply.contains("not found"));
    }

    #[tokio::test]
    async fn test_help_reply_without_lookup() {
        let agent = WeatherToolAgent::new(Arc::new(MockWeatherLookup::new()));
        assert_eq!(agent.handle("hi").await.unwrap(), HELP_REPLY);
    }
}
