//! Open-Meteo forecast adapter

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::condition::Condition;
use crate::data::WeatherData;
use crate::provider::{WeatherError, WeatherProvider};

/// Default Open-Meteo API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

const PROVIDER_NAME: &str = "open-meteo";

/// Live Open-Meteo forecast adapter
///
/// All connection parameters come in through the constructor so the
/// adapter can be swapped for a stub in tests.
pub struct OpenMeteoProvider {
    base_url: String,
    client: reqwest::Client,
}

/// Current-conditions block of the forecast payload
#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    weather_code: Option<i32>,
    is_day: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    current: Option<CurrentBlock>,
}

impl OpenMeteoProvider {
    /// Create a new adapter against the given base URL with a per-call timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<WeatherData, WeatherError> {
        let timezone = if timezone.is_empty() { "auto" } else { timezone };
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", "temperature_2m,weather_code,is_day".to_string()),
                ("timezone", timezone.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(latitude, longitude, error = %e, "open-meteo request failed");
                if e.is_timeout() {
                    WeatherError::Timeout
                } else {
                    WeatherError::Unavailable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(WeatherError::Upstream(format!(
                "status {}",
                response.status()
            )));
        }

        let payload: ForecastPayload = response
            .json()
            .await
            .map_err(|e| WeatherError::Upstream(e.to_string()))?;

        let current = payload.current;
        let weather_code = current.as_ref().and_then(|c| c.weather_code);
        let temperature_c = current.as_ref().and_then(|c| c.temperature_2m);
        let is_day = current.as_ref().and_then(|c| c.is_day).map(|v| v != 0);

        Ok(WeatherData {
            latitude,
            longitude,
            temperature_c,
            weather_code,
            is_day,
            condition: Condition::from_code(weather_code),
            source: PROVIDER_NAME.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider =
            OpenMeteoProvider::new("https://api.open-meteo.com/", Duration::from_secs(6))
                .expect("build provider");
        assert_eq!(provider.base_url, "https://api.open-meteo.com");
        assert_eq!(provider.name(), "open-meteo");
    }

    #[test]
    fn test_payload_parsing() {
        let payload: ForecastPayload = serde_json::from_str(
            r#"{"current":{"temperature_2m":27.4,"weather_code":63,"is_day":1}}"#,
        )
        .unwrap();
        let current = payload.current.unwrap();
        assert_eq!(current.temperature_2m, Some(27.4));
        assert_eq!(current.weather_code, Some(63));
        assert_eq!(current.is_day, Some(1));
        assert_eq!(Condition::from_code(current.weather_code), Condition::Rain);
    }

    #[test]
    fn test_payload_tolerates_missing_current() {
        let payload: ForecastPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.current.is_none());
    }
}
