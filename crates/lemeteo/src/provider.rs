//! Weather capability trait and stub adapter

use async_trait::async_trait;

use crate::condition::Condition;
use crate::data::WeatherData;

/// Source name reported by the stub adapter
pub const STUB_SOURCE: &str = "stub";

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Per-call time budget exceeded
    #[error("weather provider timed out")]
    Timeout,

    /// Transport-level failure reaching the provider
    #[error("weather provider unavailable: {0}")]
    Unavailable(String),

    /// Provider reachable but returned an unusable payload
    #[error("weather provider returned bad payload: {0}")]
    Upstream(String),
}

/// Capability: fetch the current observation for a coordinate pair
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Provider name used in the report's `source` field
    fn name(&self) -> &str;

    /// Fetch the current weather for a location
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<WeatherData, WeatherError>;
}

/// Build the degraded observation the stub adapter always returns
pub fn stub_observation(latitude: f64, longitude: f64) -> WeatherData {
    WeatherData {
        latitude,
        longitude,
        temperature_c: None,
        weather_code: None,
        is_day: None,
        condition: Condition::Unknown,
        source: STUB_SOURCE.to_string(),
    }
}

/// Fixed-output adapter used when the live provider is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct StubWeatherProvider;

#[async_trait]
impl WeatherProvider for StubWeatherProvider {
    fn name(&self) -> &str {
        STUB_SOURCE
    }

    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
        _timezone: &str,
    ) -> Result<WeatherData, WeatherError> {
        Ok(stub_observation(latitude, longitude))
    }
}
