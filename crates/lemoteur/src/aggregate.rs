//! Route enrichment over deduplicated candidates
//!
//! Route lookups fan out concurrently, one per candidate, each under its
//! own time budget. A failed or slow lookup leaves that candidate with no
//! travel hint; it is never dropped for that reason and never affects its
//! siblings.

use std::time::Duration;

use futures::future::join_all;
use tokio::time::timeout;
use tracing::warn;

use lecarte::{Candidate, Coordinates, Directions, RouteHint, TravelMode};

/// A candidate with its optional travel hint attached
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCandidate {
    /// The place as returned by the search provider
    pub candidate: Candidate,

    /// Travel hint relative to the request origin, when obtainable
    pub route: Option<RouteHint>,
}

impl EnrichedCandidate {
    /// Wrap a candidate with no travel hint
    pub fn bare(candidate: Candidate) -> Self {
        Self {
            candidate,
            route: None,
        }
    }
}

/// Enrich each candidate with a route hint from `origin`.
///
/// All lookups run concurrently; per-candidate failures are swallowed.
pub async fn enrich(
    directions: &dyn Directions,
    candidates: Vec<Candidate>,
    origin: Coordinates,
    mode: TravelMode,
    per_call_timeout: Duration,
) -> Vec<EnrichedCandidate> {
    let lookups = candidates.into_iter().map(|candidate| async move {
        let destination = candidate.location;
        let route = match timeout(per_call_timeout, directions.route(origin, destination, mode))
            .await
        {
            Ok(Ok(hint)) => Some(hint),
            Ok(Err(e)) => {
                warn!(place_id = %candidate.place_id, error = %e, "route lookup failed");
                None
            }
            Err(_) => {
                warn!(place_id = %candidate.place_id, "route lookup exceeded time budget");
                None
            }
        };
        EnrichedCandidate { candidate, route }
    });

    join_all(lookups).await
}
