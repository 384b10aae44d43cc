//! Response clamping, degradation signaling, and wire shapes
//!
//! The assembler always produces a structurally valid response. Provider
//! failure shows up as a degraded context, never as an error; only
//! malformed requests are rejected, and that happens before this stage.
//! The requesting user's own coordinates never appear in any field.

use lecarte::Coordinates;
use lemeteo::{Condition, WeatherReport};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::MIN_RESULTS;
use crate::scoring::ScoredCandidate;

/// Reason used when the maps provider was disabled or failed outright
pub const MAPS_FALLBACK_REASON: &str = "maps_provider_disabled_or_unavailable";

/// Reason used when fewer than the floor of candidates survived
pub const SPARSE_FALLBACK_REASON: &str = "insufficient_live_place_results";

/// One ranked, explainable, map-ready recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    /// Provider-assigned place identifier
    pub place_id: String,

    /// Display name
    pub name: String,

    /// Formatted address
    pub address: String,

    /// Aggregate rating, when known
    pub rating: Option<f64>,

    /// Review count behind the rating, when known
    pub user_ratings_total: Option<u32>,

    /// Provider category tags
    pub types: Vec<String>,

    /// The place's own coordinates (never the requesting user's)
    pub location: Coordinates,

    /// Photo URL, when available
    pub photo_url: Option<String>,

    /// External deep-link, when available
    pub maps_uri: Option<String>,

    /// Human-readable distance, null when the route lookup failed
    pub distance_text: Option<String>,

    /// Human-readable duration, null when the route lookup failed
    pub duration_text: Option<String>,

    /// Overall suitability in [0, 1]
    pub fit_score: f64,

    /// Why this place was recommended
    pub rationale: String,
}

impl From<ScoredCandidate> for RecommendationItem {
    fn from(scored: ScoredCandidate) -> Self {
        let route = scored.enriched.route;
        let candidate = scored.enriched.candidate;
        Self {
            place_id: candidate.place_id,
            name: candidate.name,
            address: candidate.address,
            rating: candidate.rating,
            user_ratings_total: candidate.user_ratings_total,
            types: candidate.types,
            location: candidate.location,
            photo_url: candidate.photo_url,
            maps_uri: candidate.maps_uri,
            distance_text: route.as_ref().and_then(|r| r.distance_text.clone()),
            duration_text: route.as_ref().and_then(|r| r.duration_text.clone()),
            fit_score: scored.fit_score,
            rationale: scored.rationale,
        }
    }
}

/// Context block attached to every response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationContext {
    /// Normalized weather condition used during scoring
    pub weather_condition: Condition,

    /// Temperature in Celsius, when the weather signal was live
    pub temperature_c: Option<f64>,

    /// True whenever any upstream signal could not be obtained in time
    pub degraded: bool,

    /// Human-readable explanation when degraded, null otherwise
    pub fallback_reason: Option<String>,
}

/// The complete recommendation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Opaque identifier, unique per call
    pub request_id: String,

    /// 3-5 ranked items; fewer only on the degraded/insufficient path
    pub recommendations: Vec<RecommendationItem>,

    /// Weather and degradation context
    pub context: RecommendationContext,
}

/// Degradation signals collected while the request was processed
#[derive(Debug, Default, Clone, Copy)]
pub struct DegradationSignals {
    /// The search provider failed outright or is the disabled stub
    pub search_unavailable: bool,
}

/// Clamp the ranked candidates to the response window and attach context.
///
/// `scored` must already be in response order. When fewer than the floor of
/// three survive, all available items are returned and the response is
/// marked degraded; no synthetic placeholder places are fabricated.
pub fn assemble(
    scored: Vec<ScoredCandidate>,
    weather: &WeatherReport,
    signals: DegradationSignals,
    max_results: usize,
) -> RecommendationResponse {
    let recommendations: Vec<RecommendationItem> =
        scored.into_iter().take(max_results).map(Into::into).collect();

    let mut degraded = weather.degraded;
    let mut fallback_reason = weather.fallback_reason.clone();

    if signals.search_unavailable {
        degraded = true;
        fallback_reason = Some(MAPS_FALLBACK_REASON.to_string());
    }

    if recommendations.len() < MIN_RESULTS {
        degraded = true;
        fallback_reason = fallback_reason.or_else(|| Some(SPARSE_FALLBACK_REASON.to_string()));
    }

    RecommendationResponse {
        request_id: Uuid::new_v4().to_string(),
        recommendations,
        context: RecommendationContext {
            weather_condition: weather.condition(),
            temperature_c: weather.weather.temperature_c,
            degraded,
            fallback_reason,
        },
    }
}
