//! HTTP handlers for REST endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use lecarte::Coordinates;
use lemeteo::{WeatherReport, WeatherService};
use lemoteur::{RecommendationEngine, RecommendationRequest, RecommendationResponse};

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};

/// Shared application state for handlers
#[derive(Clone)]
pub struct AppState {
    /// The recommendation engine
    pub engine: Arc<RecommendationEngine>,

    /// Standalone weather lookup for the weather endpoint
    pub weather: WeatherService,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

/// Query parameters for the weather endpoint
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// IANA timezone name; defaults to provider-side auto resolution
    pub timezone: Option<String>,
}

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/recommendations", post(recommendations))
        .route("/weather", get(weather))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "leguide",
        "version": env!("CARGO_PKG_VERSION"),
        "weather_enabled": state.config.weather_enabled,
        "maps_enabled": state.config.maps_enabled,
    }))
}

/// Produce ranked place recommendations for a query and location
async fn recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> ApiResult<Json<RecommendationResponse>> {
    debug!(user_id = %request.user_id, query = %request.query, "recommendation request");
    let response = state.engine.recommend(&request).await?;
    Ok(Json(response))
}

/// Current weather at a coordinate pair
async fn weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> ApiResult<Json<WeatherReport>> {
    let origin = Coordinates::new(params.latitude, params.longitude);
    if !origin.is_valid() {
        return Err(ApiError::validation(format!(
            "Coordinates out of range: ({}, {})",
            params.latitude, params.longitude
        )));
    }

    let timezone = params.timezone.as_deref().unwrap_or("auto");
    let report = state
        .weather
        .current(params.latitude, params.longitude, timezone)
        .await;
    Ok(Json(report))
}
