//! Weather payload and report types

use serde::{Deserialize, Serialize};

use crate::condition::Condition;

/// Normalized weather observation for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    /// Observation latitude
    pub latitude: f64,

    /// Observation longitude
    pub longitude: f64,

    /// Current temperature in Celsius, when reported
    pub temperature_c: Option<f64>,

    /// Raw upstream WMO weather code, when reported
    pub weather_code: Option<i32>,

    /// Daylight flag, when reported
    pub is_day: Option<bool>,

    /// Normalized condition
    pub condition: Condition,

    /// Name of the provider that produced this observation
    pub source: String,
}

/// Weather lookup result with degradation signals
///
/// A degraded report is a valid payload, never an error: consumers treat
/// `condition == unknown` as the neutral case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Opaque identifier for this lookup
    pub request_id: String,

    /// The observation itself
    pub weather: WeatherData,

    /// Whether the upstream signal could not be obtained in time
    pub degraded: bool,

    /// Why the signal is degraded; always set when `degraded` is true
    pub fallback_reason: Option<String>,
}

impl WeatherReport {
    /// Condition carried by this report
    pub fn condition(&self) -> Condition {
        self.weather.condition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_data_serializes_condition_string() {
        let data = WeatherData {
            latitude: 22.3,
            longitude: 114.2,
            temperature_c: Some(28.5),
            weather_code: Some(61),
            is_day: Some(true),
            condition: Condition::Rain,
            source: "open-meteo".to_string(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["condition"], "rain");
        assert_eq!(json["temperature_c"], 28.5);
    }

    #[test]
    fn test_report_emits_null_reason() {
        let report = WeatherReport {
            request_id: "r-1".to_string(),
            weather: WeatherData {
                latitude: 0.0,
                longitude: 0.0,
                temperature_c: None,
                weather_code: None,
                is_day: None,
                condition: Condition::Unknown,
                source: "stub".to_string(),
            },
            degraded: false,
            fallback_reason: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["fallback_reason"].is_null());
    }
}
