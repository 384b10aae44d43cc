//! Query planning and fallback broadening
//!
//! The planner issues the caller's query first and broadens into fixed
//! discovery queries only while results stay sparse. One attempt per query
//! variant, no retries, so latency stays bounded.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, warn};

use lecarte::{Candidate, Coordinates, PlaceSearch};

/// Broader discovery categories tried when the original query is sparse
pub const FALLBACK_DISCOVERY_QUERIES: [&str; 4] = ["cafe", "park", "museum", "restaurant"];

/// Upper bound on query variants issued per request
pub const MAX_QUERY_ATTEMPTS: usize = 5;

/// Ordered query variants for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Queries in issue order: original first, then broadened variants
    pub queries: Vec<String>,
}

/// Outcome of driving a [`Plan`] against the search provider
#[derive(Debug, Default)]
pub struct Gathered {
    /// Deduplicated candidates, first occurrence wins
    pub candidates: Vec<Candidate>,

    /// Number of query variants actually issued
    pub attempted: usize,

    /// Whether any variant beyond the original was issued
    pub broadened: bool,

    /// Whether the provider itself failed (as opposed to sparse results)
    pub provider_failed: bool,
}

/// Build the query plan for a free-text query.
///
/// Discovery fallbacks already mentioned in the query are skipped; the plan
/// never exceeds [`MAX_QUERY_ATTEMPTS`] variants.
pub fn plan(query: &str) -> Plan {
    let trimmed = query.trim();
    let lowered = trimmed.to_lowercase();

    let mut queries = vec![trimmed.to_string()];
    for fallback in FALLBACK_DISCOVERY_QUERIES {
        if !lowered.contains(fallback) {
            queries.push(format!("{fallback} near me"));
        }
    }
    queries.truncate(MAX_QUERY_ATTEMPTS);

    Plan { queries }
}

/// Drive the plan against the search provider until `target` unique
/// candidates are accumulated, the variants run out, the provider fails,
/// or `overall_budget` is spent.
///
/// Every call is bounded by `per_call_timeout`, capped by whatever remains
/// of the overall budget. Budget expiry never discards candidates already
/// gathered; it only stops further variants.
pub async fn gather(
    search: &dyn PlaceSearch,
    plan: &Plan,
    origin: Coordinates,
    target: usize,
    per_call_timeout: Duration,
    overall_budget: Duration,
) -> Gathered {
    let deadline = Instant::now() + overall_budget;
    let mut gathered = Gathered::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, query) in plan.queries.iter().enumerate() {
        if gathered.candidates.len() >= target {
            break;
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            warn!(query, "candidate gathering exhausted the request budget");
            gathered.provider_failed = true;
            break;
        }

        gathered.attempted += 1;
        if index > 0 {
            gathered.broadened = true;
        }

        let call_budget = per_call_timeout.min(remaining);
        let batch = match timeout(call_budget, search.search_places(query, origin, target)).await {
            Ok(Ok(batch)) => batch,
            Ok(Err(e)) => {
                warn!(query, error = %e, "place search failed, stopping fallback broadening");
                gathered.provider_failed = true;
                break;
            }
            Err(_) => {
                warn!(query, "place search exceeded time budget");
                gathered.provider_failed = true;
                break;
            }
        };

        debug!(query, results = batch.len(), "place search variant issued");
        for candidate in batch {
            if gathered.candidates.len() >= target {
                break;
            }
            if seen.insert(candidate.dedupe_key()) {
                gathered.candidates.push(candidate);
            }
        }
    }

    gathered
}
