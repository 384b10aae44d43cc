//! Request orchestration with bounded time budgets
//!
//! One engine instance serves all requests; each request is handled
//! statelessly, so concurrent requests share nothing but the provider
//! adapters. The weather fetch and candidate gathering run concurrently,
//! and route lookups fan out after aggregation. Dropping the returned
//! future (client disconnect) drops every in-flight provider call for that
//! request without touching any other request.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use lecarte::{Directions, PlaceSearch, STUB_PROVIDER_NAME};
use lemeteo::WeatherService;

use crate::aggregate::{self, EnrichedCandidate};
use crate::assemble::{self, DegradationSignals, RecommendationResponse};
use crate::planner;
use crate::request::{RecommendationRequest, RequestError};
use crate::scoring;

/// Time budgets for one request
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Budget for each individual provider call
    pub provider_timeout: Duration,

    /// Budget for the gather stage and for the enrich stage each; on expiry
    /// the engine proceeds with whatever is available
    pub request_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(6),
            request_timeout: Duration::from_secs(12),
        }
    }
}

/// The recommendation engine: planner, aggregator, scorer, assembler wired
/// over swappable provider adapters
pub struct RecommendationEngine {
    search: Arc<dyn PlaceSearch>,
    directions: Arc<dyn Directions>,
    weather: WeatherService,
    config: EngineConfig,
}

impl RecommendationEngine {
    /// Wire the engine over its three upstream capabilities
    pub fn new(
        search: Arc<dyn PlaceSearch>,
        directions: Arc<dyn Directions>,
        weather: WeatherService,
        config: EngineConfig,
    ) -> Self {
        Self {
            search,
            directions,
            weather,
            config,
        }
    }

    /// Produce ranked recommendations for one request.
    ///
    /// The only error path is a malformed request; every provider failure
    /// degrades into a structurally valid response instead.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, RequestError> {
        request.validate()?;

        let max_results = request.effective_max_results();
        let origin = request.origin();
        let plan = planner::plan(&request.query);

        // Candidate target is double the response window so scoring has
        // real choices to rank.
        let target = max_results * 2;
        let gather = planner::gather(
            self.search.as_ref(),
            &plan,
            origin,
            target,
            self.config.provider_timeout,
            self.config.request_timeout,
        );
        let weather = self
            .weather
            .current(request.latitude, request.longitude, "auto");

        let (weather, gathered) = tokio::join!(weather, gather);

        let search_unavailable =
            gathered.provider_failed || self.search.name() == STUB_PROVIDER_NAME;

        let enriched = if gathered.candidates.is_empty() {
            Vec::new()
        } else {
            let candidates = gathered.candidates;
            match timeout(
                self.config.request_timeout,
                aggregate::enrich(
                    self.directions.as_ref(),
                    candidates.clone(),
                    origin,
                    request.travel_mode,
                    self.config.provider_timeout,
                ),
            )
            .await
            {
                Ok(enriched) => enriched,
                Err(_) => {
                    warn!("route enrichment exceeded the request budget");
                    candidates.into_iter().map(EnrichedCandidate::bare).collect()
                }
            }
        };

        let scored = scoring::score_and_rank(enriched, request, weather.condition());
        let response = assemble::assemble(
            scored,
            &weather,
            DegradationSignals { search_unavailable },
            max_results,
        );

        info!(
            request_id = %response.request_id,
            results = response.recommendations.len(),
            degraded = response.context.degraded,
            broadened = gathered.broadened,
            attempted = gathered.attempted,
            "recommendation request served"
        );

        Ok(response)
    }
}
