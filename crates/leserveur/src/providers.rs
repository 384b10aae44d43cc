//! Provider resolution from configuration
//!
//! Adapters are constructed once at startup with explicit configuration.
//! A disabled feature flag or a missing API key resolves to the matching
//! stub so the product keeps answering, just marked degraded.

use std::sync::Arc;

use tracing::{info, warn};

use lecarte::{
    Directions, GoogleMapsConfig, GoogleMapsProvider, PlaceSearch, StubPlaceProvider,
};
use lemeteo::{OpenMeteoProvider, StubWeatherProvider, WeatherProvider};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Resolve the weather capability from config
pub fn resolve_weather(config: &ServerConfig) -> Result<Arc<dyn WeatherProvider>, ApiError> {
    if !config.weather_enabled {
        warn!("weather provider disabled, responses will use the stub");
        return Ok(Arc::new(StubWeatherProvider));
    }
    let provider =
        OpenMeteoProvider::new(&config.open_meteo_base_url, config.provider_timeout())
            .map_err(|e| ApiError::internal(format!("Failed to build weather provider: {e}")))?;
    info!(base_url = %config.open_meteo_base_url, "weather provider: open-meteo");
    Ok(Arc::new(provider))
}

/// Resolve the place-search and directions capabilities from config
#[allow(clippy::type_complexity)]
pub fn resolve_maps(
    config: &ServerConfig,
) -> Result<(Arc<dyn PlaceSearch>, Arc<dyn Directions>), ApiError> {
    if !config.maps_enabled || config.google_maps_api_key.is_empty() {
        warn!("maps provider disabled or key missing, responses will use the stub");
        let stub = Arc::new(StubPlaceProvider);
        return Ok((stub.clone() as Arc<dyn PlaceSearch>, stub as Arc<dyn Directions>));
    }

    let provider = GoogleMapsProvider::new(GoogleMapsConfig {
        api_key: config.google_maps_api_key.clone(),
        language: config.google_maps_language.clone(),
        region: config.google_maps_region.clone(),
        radius_meters: config.google_maps_radius_meters,
        photo_max_width: config.google_maps_photo_max_width,
        timeout: config.provider_timeout(),
    })
    .map_err(|e| ApiError::internal(format!("Failed to build maps provider: {e}")))?;

    info!(region = %config.google_maps_region, "maps provider: google-maps");
    let provider = Arc::new(provider);
    Ok((
        provider.clone() as Arc<dyn PlaceSearch>,
        provider as Arc<dyn Directions>,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lecarte::STUB_PROVIDER_NAME;

    #[test]
    fn test_missing_key_resolves_stub_maps() {
        let config = ServerConfig::default();
        let (search, _directions) = resolve_maps(&config).expect("resolve");
        assert_eq!(search.name(), STUB_PROVIDER_NAME);
    }

    #[test]
    fn test_configured_key_resolves_live_maps() {
        let config = ServerConfig {
            google_maps_api_key: "key".to_string(),
            ..Default::default()
        };
        let (search, _directions) = resolve_maps(&config).expect("resolve");
        assert_eq!(search.name(), "google-maps");
    }

    #[test]
    fn test_disabled_weather_resolves_stub() {
        let config = ServerConfig {
            weather_enabled: false,
            ..Default::default()
        };
        let provider = resolve_weather(&config).expect("resolve");
        assert_eq!(provider.name(), "stub");
    }

    #[test]
    fn test_enabled_weather_resolves_open_meteo() {
        let config = ServerConfig::default();
        let provider = resolve_weather(&config).expect("resolve");
        assert_eq!(provider.name(), "open-meteo");
    }
}
