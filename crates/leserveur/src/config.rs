//! Server configuration from environment

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default host address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port number
pub const DEFAULT_PORT: u16 = 8000;

/// Default CORS origins (local frontend for development)
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

/// Default per-provider-call timeout in seconds
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 6;

/// Default aggregate request budget in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 12;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Allowed CORS origins
    pub cors_origins: Vec<String>,

    /// Log level for tracing
    pub log_level: String,

    /// Whether the live weather provider is enabled
    pub weather_enabled: bool,

    /// Whether the live maps provider is enabled
    pub maps_enabled: bool,

    /// Open-Meteo API base URL
    pub open_meteo_base_url: String,

    /// Google Maps API key; blank forces the stub provider
    pub google_maps_api_key: String,

    /// Result language for place search
    pub google_maps_language: String,

    /// Region bias for place search
    pub google_maps_region: String,

    /// Place search radius in meters
    pub google_maps_radius_meters: u32,

    /// Max width requested for place photos
    pub google_maps_photo_max_width: u32,

    /// Per-provider-call timeout in seconds
    pub provider_timeout_secs: u64,

    /// Aggregate per-request budget in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            log_level: "info".to_string(),
            weather_enabled: true,
            maps_enabled: true,
            open_meteo_base_url: lemeteo::openmeteo::DEFAULT_BASE_URL.to_string(),
            google_maps_api_key: String::new(),
            google_maps_language: "en".to_string(),
            google_maps_region: "hk".to_string(),
            google_maps_radius_meters: 5000,
            google_maps_photo_max_width: 800,
            provider_timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load config from environment variables with fallback to defaults.
    ///
    /// Environment variables:
    /// - `LEGUIDE_HOST` / `LEGUIDE_PORT`
    /// - `LEGUIDE_CORS_ORIGINS` (comma separated)
    /// - `LEGUIDE_LOG_LEVEL` (trace, debug, info, warn, error)
    /// - `LEGUIDE_WEATHER_ENABLED` / `LEGUIDE_MAPS_ENABLED` ("true"/"false")
    /// - `OPEN_METEO_BASE_URL`
    /// - `GOOGLE_MAPS_API_KEY`, `GOOGLE_MAPS_LANGUAGE`, `GOOGLE_MAPS_REGION`,
    ///   `GOOGLE_MAPS_RADIUS_METERS`, `GOOGLE_MAPS_PHOTO_MAX_WIDTH`
    /// - `LEGUIDE_PROVIDER_TIMEOUT_SECS` / `LEGUIDE_REQUEST_TIMEOUT_SECS`
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("LEGUIDE_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("LEGUIDE_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.port = port;
            }
        }
        if let Ok(origins) = std::env::var("LEGUIDE_CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(level) = std::env::var("LEGUIDE_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Ok(flag) = std::env::var("LEGUIDE_WEATHER_ENABLED") {
            config.weather_enabled = flag == "true" || flag == "1";
        }
        if let Ok(flag) = std::env::var("LEGUIDE_MAPS_ENABLED") {
            config.maps_enabled = flag == "true" || flag == "1";
        }
        if let Ok(url) = std::env::var("OPEN_METEO_BASE_URL") {
            config.open_meteo_base_url = url;
        }
        if let Ok(key) = std::env::var("GOOGLE_MAPS_API_KEY") {
            config.google_maps_api_key = key;
        }
        if let Ok(language) = std::env::var("GOOGLE_MAPS_LANGUAGE") {
            config.google_maps_language = language;
        }
        if let Ok(region) = std::env::var("GOOGLE_MAPS_REGION") {
            config.google_maps_region = region;
        }
        if let Ok(radius) = std::env::var("GOOGLE_MAPS_RADIUS_METERS") {
            if let Ok(radius) = radius.parse::<u32>() {
                config.google_maps_radius_meters = radius;
            }
        }
        if let Ok(width) = std::env::var("GOOGLE_MAPS_PHOTO_MAX_WIDTH") {
            if let Ok(width) = width.parse::<u32>() {
                config.google_maps_photo_max_width = width;
            }
        }
        if let Ok(secs) = std::env::var("LEGUIDE_PROVIDER_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.provider_timeout_secs = secs;
            }
        }
        if let Ok(secs) = std::env::var("LEGUIDE_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.request_timeout_secs = secs;
            }
        }

        config
    }

    /// Get the socket address for the server
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {}", e))
    }

    /// Get the full server URL
    #[must_use]
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Per-provider-call timeout
    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Aggregate per-request budget
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be zero".to_string());
        }
        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }
        if self.provider_timeout_secs == 0 {
            return Err("Provider timeout must be greater than zero".to_string());
        }
        if self.request_timeout_secs < self.provider_timeout_secs {
            return Err("Request budget must cover at least one provider call".to_string());
        }
        if self.google_maps_radius_meters == 0 {
            return Err("Search radius must be greater than zero".to_string());
        }
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.log_level
                ));
            }
        }
        Ok(())
    }
}
