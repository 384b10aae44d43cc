//! Degradation-aware weather lookup
//!
//! Wraps a [`WeatherProvider`] so that every failure mode (transport error,
//! timeout, unusable payload) collapses into a valid degraded report instead
//! of an error. Nothing downstream of this service ever sees a weather
//! failure.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;
use uuid::Uuid;

use crate::condition::Condition;
use crate::data::{WeatherData, WeatherReport};
use crate::provider::{stub_observation, WeatherProvider, STUB_SOURCE};

/// Reason attached to reports produced without a live observation
pub const PROVIDER_FALLBACK_REASON: &str = "provider_disabled_or_unavailable";

/// Reason attached when a live observation carried a code outside the table
pub const UNRECOGNIZED_CODE_REASON: &str = "unrecognized_weather_code";

/// Weather lookup with a bounded time budget
#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    call_timeout: Duration,
}

impl WeatherService {
    /// Create a service over the given provider with a per-call timeout
    pub fn new(provider: Arc<dyn WeatherProvider>, call_timeout: Duration) -> Self {
        Self {
            provider,
            call_timeout,
        }
    }

    /// Fetch the current weather, degrading instead of failing.
    ///
    /// The returned report is degraded when the provider was the stub,
    /// errored, exceeded the time budget, or produced an unknown condition.
    pub async fn current(&self, latitude: f64, longitude: f64, timezone: &str) -> WeatherReport {
        let lookup = self.provider.current(latitude, longitude, timezone);
        let weather = match timeout(self.call_timeout, lookup).await {
            Ok(Ok(data)) => data,
            Ok(Err(e)) => {
                warn!(latitude, longitude, error = %e, "weather lookup failed, using stub");
                stub_observation(latitude, longitude)
            }
            Err(_) => {
                warn!(latitude, longitude, "weather lookup exceeded time budget");
                stub_observation(latitude, longitude)
            }
        };

        Self::report_from(weather)
    }

    fn report_from(weather: WeatherData) -> WeatherReport {
        let stubbed = weather.source == STUB_SOURCE;
        let degraded = stubbed || weather.condition == Condition::Unknown;

        // Every degraded report carries an explanation: a stubbed source
        // first, an unmapped live code otherwise.
        let fallback_reason = if stubbed {
            Some(PROVIDER_FALLBACK_REASON.to_string())
        } else if degraded {
            Some(UNRECOGNIZED_CODE_REASON.to_string())
        } else {
            None
        };

        WeatherReport {
            request_id: Uuid::new_v4().to_string(),
            weather,
            degraded,
            fallback_reason,
        }
    }
}
