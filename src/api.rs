//! OpenWeather current-weather client

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::ProviderSettings;
use crate::state::WeatherReading;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything that can go wrong during a fetch. Only the log distinguishes the
/// causes; the public boundary collapses them all into one absent outcome.
#[derive(Debug, Error)]
enum FetchError {
    #[error("empty city name")]
    EmptyCity,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(reqwest::StatusCode),
}

/// One client per application run, cheap to clone into fetch tasks.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(provider: &ProviderSettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: provider.base_url.clone(),
            api_key: provider.api_key.clone(),
        })
    }

    /// Fetch current conditions for a city.
    ///
    /// Returns `None` whenever the weather is unavailable - network failure,
    /// non-2xx status, malformed payload or an empty city name all look the
    /// same to the caller.
    pub async fn fetch(&self, city: &str) -> Option<WeatherReading> {
        match self.try_fetch(city).await {
            Ok(reading) => Some(reading),
            Err(err) => {
                tracing::warn!(city, error = %err, "weather fetch failed");
                None
            }
        }
    }

    async fn try_fetch(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "es"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let parsed: CurrentResponse = response.json().await?;

        let condition = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "desconocido".to_string());

        Ok(WeatherReading {
            city: parsed.name,
            temperature_c: parsed.main.temp,
            condition,
            humidity_pct: Some(parsed.main.humidity),
            wind_speed_mps: parsed.wind.map(|w| w.speed),
            feels_like_c: Some(parsed.main.feels_like),
        })
    }
}

// ============================================================================
// Provider JSON shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    main: MainSection,
    #[serde(default)]
    weather: Vec<ConditionSection>,
    wind: Option<WindSection>,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionSection {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WindSection {
    speed: f64,
}
