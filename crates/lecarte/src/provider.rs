//! Capability traits, provider errors, and stub adapters

use async_trait::async_trait;

use crate::types::{Candidate, Coordinates, RouteHint, TravelMode};

/// Provider name reported by the stub adapters
pub const STUB_PROVIDER_NAME: &str = "maps-stub";

/// Place/route provider errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Per-call time budget exceeded
    #[error("provider timed out")]
    Timeout,

    /// Transport-level failure reaching the provider
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Provider reachable but returned an error status or unusable payload
    #[error("provider returned bad payload: {0}")]
    Upstream(String),
}

/// Capability: free-text place search around a location
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Provider name used for degradation reporting
    fn name(&self) -> &str;

    /// Search for places matching `query` near the given origin.
    ///
    /// An empty result set is a valid answer (sparse area); an `Err` means
    /// the provider itself failed and no further variants should be issued.
    async fn search_places(
        &self,
        query: &str,
        origin: Coordinates,
        max_results: usize,
    ) -> Result<Vec<Candidate>, ProviderError>;
}

/// Capability: travel hint for one origin-destination pair
#[async_trait]
pub trait Directions: Send + Sync {
    /// Fetch distance/duration for the pair, or fail for this pair alone
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<RouteHint, ProviderError>;
}

/// Fixed-output adapter used when the live maps provider is disabled.
///
/// Returns no candidates and fails every route lookup, which drives the
/// engine down its degraded path.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubPlaceProvider;

#[async_trait]
impl PlaceSearch for StubPlaceProvider {
    fn name(&self) -> &str {
        STUB_PROVIDER_NAME
    }

    async fn search_places(
        &self,
        _query: &str,
        _origin: Coordinates,
        _max_results: usize,
    ) -> Result<Vec<Candidate>, ProviderError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl Directions for StubPlaceProvider {
    async fn route(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
        _mode: TravelMode,
    ) -> Result<RouteHint, ProviderError> {
        Err(ProviderError::Unavailable(
            "maps provider disabled".to_string(),
        ))
    }
}
