//! lemoteur - Context-Aware Recommendation Engine
//!
//! *Le Moteur* (The Engine) - Deterministic, explainable place ranking that
//! stays structurally valid when any upstream signal provider fails.
//!
//! Control flow per request: planner issues place searches while the
//! weather context is fetched concurrently; the aggregator fans out route
//! lookups over the deduplicated candidates; the scoring engine produces a
//! total order; the assembler clamps and packages the response.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Route enrichment over deduplicated candidates
pub mod aggregate;

/// Response clamping, degradation signaling, and wire shapes
pub mod assemble;

/// Request orchestration with bounded time budgets
pub mod engine;

/// Query planning and fallback broadening
pub mod planner;

/// Inbound request model and validation
pub mod request;

/// Deterministic multi-factor scoring
pub mod scoring;

pub use aggregate::EnrichedCandidate;
pub use assemble::{
    DegradationSignals, RecommendationContext, RecommendationItem, RecommendationResponse,
    MAPS_FALLBACK_REASON, SPARSE_FALLBACK_REASON,
};
pub use engine::{EngineConfig, RecommendationEngine};
pub use planner::{Gathered, Plan};
pub use request::{RecommendationRequest, RequestError, Role};
pub use scoring::ScoredCandidate;
