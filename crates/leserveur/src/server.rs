//! Server instance management

use std::net::SocketAddr;
use std::sync::Arc;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::Method;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use lemeteo::WeatherService;
use lemoteur::{EngineConfig, RecommendationEngine};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::handlers::{create_router, AppState};
use crate::providers;

/// LeGuide HTTP server
///
/// Manages Axum server lifecycle including provider wiring,
/// startup, and graceful shutdown.
pub struct LeGuideServer {
    /// Server configuration
    config: ServerConfig,

    /// Shared handler state
    state: AppState,
}

impl LeGuideServer {
    /// Create a new server instance.
    ///
    /// Validates the configuration and wires the provider adapters into
    /// the recommendation engine.
    pub fn new(config: ServerConfig) -> Result<Self, ApiError> {
        if let Err(e) = config.validate() {
            return Err(ApiError::internal(format!("Invalid config: {}", e)));
        }

        let weather_provider = providers::resolve_weather(&config)?;
        let (search, directions) = providers::resolve_maps(&config)?;

        let weather = WeatherService::new(weather_provider, config.provider_timeout());
        let engine = RecommendationEngine::new(
            search,
            directions,
            weather.clone(),
            EngineConfig {
                provider_timeout: config.provider_timeout(),
                request_timeout: config.request_timeout(),
            },
        );

        let state = AppState {
            engine: Arc::new(engine),
            weather,
            config: Arc::new(config.clone()),
        };

        Ok(Self { config, state })
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, ApiError> {
        self.config
            .socket_addr()
            .map_err(|e| ApiError::internal(format!("Failed to parse address: {}", e)))
    }

    /// Start the server and serve until shutdown
    pub async fn start(&self) -> Result<(), ApiError> {
        let addr = self.socket_addr()?;

        let app = create_router(self.state.clone())
            .layer(self.cors_layer())
            .layer(TraceLayer::new_for_http());

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            error!("Failed to bind to {}: {:?}", addr, e);
            ApiError::internal(format!("Failed to bind to {}: {}", addr, e))
        })?;

        info!("Server listening on: {}", self.server_url());

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))
    }

    fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<_> = self
            .config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "skipping unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([ACCEPT, CONTENT_TYPE])
    }

    /// Get server URL
    #[must_use]
    pub fn server_url(&self) -> String {
        self.config.server_url()
    }
}

/// Resolves when Ctrl+C or SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            error!("Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received TERM signal");
            }
            Err(_) => {
                error!("Failed to install TERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_default_config() {
        let config = ServerConfig::default();
        let server = LeGuideServer::new(config);
        assert!(server.is_ok());
    }

    #[test]
    fn test_server_rejects_invalid_config() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(LeGuideServer::new(config).is_err());
    }

    #[test]
    fn test_server_url_formatting() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..Default::default()
        };
        let server = LeGuideServer::new(config).expect("server");
        assert_eq!(server.server_url(), "http://127.0.0.1:9000");
    }
}
