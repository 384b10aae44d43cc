//! lemeteo - Weather Context Boundary
//!
//! *La Météo* (The Weather) - Normalizes upstream forecasts into a fixed
//! condition vocabulary for the LeGuide recommendation core.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Normalized weather condition vocabulary
pub mod condition;

/// Weather payload and report types
pub mod data;

/// Open-Meteo forecast adapter
pub mod openmeteo;

/// Weather capability trait and stub adapter
pub mod provider;

/// Degradation-aware weather lookup
pub mod service;

pub use condition::Condition;
pub use data::{WeatherData, WeatherReport};
pub use openmeteo::OpenMeteoProvider;
pub use provider::{StubWeatherProvider, WeatherError, WeatherProvider, STUB_SOURCE};
pub use service::{WeatherService, PROVIDER_FALLBACK_REASON, UNRECOGNIZED_CODE_REASON};
