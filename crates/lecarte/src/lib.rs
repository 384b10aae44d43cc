//! lecarte - Place Search and Directions Boundary
//!
//! *La Carte* (The Map) - Narrow capability traits over place-search and
//! directions providers, with a live Google Maps adapter and fixed-output
//! stubs for testing and disabled deployments.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Google Maps Text Search and Directions adapter
pub mod google;

/// Capability traits, provider errors, and stub adapters
pub mod provider;

/// Place and route data model
pub mod types;

pub use google::{GoogleMapsConfig, GoogleMapsProvider};
pub use provider::{
    Directions, PlaceSearch, ProviderError, StubPlaceProvider, STUB_PROVIDER_NAME,
};
pub use types::{Candidate, Coordinates, RouteHint, TravelMode};
