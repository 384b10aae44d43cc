//! Place and route data model

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, [-90, 90]
    pub latitude: f64,

    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,
}

impl Coordinates {
    /// Create a coordinate pair
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are within their valid ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.latitude.is_finite()
            && self.longitude.is_finite()
    }
}

/// Travel mode for route lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// On foot
    #[default]
    Walking,

    /// Public transport
    Transit,

    /// By car
    Driving,
}

impl TravelMode {
    /// Wire representation of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Transit => "transit",
            Self::Driving => "driving",
        }
    }
}

/// A place returned by the search provider, before scoring
///
/// Created by the search adapter and never mutated after scoring; the
/// aggregator attaches route data alongside rather than in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Provider-assigned opaque identifier, unique per response
    pub place_id: String,

    /// Display name
    pub name: String,

    /// Formatted address
    pub address: String,

    /// Aggregate rating on a 0-5 scale, when known
    pub rating: Option<f64>,

    /// Number of ratings behind the aggregate, when known
    pub user_ratings_total: Option<u32>,

    /// Provider category tags (e.g. "cafe", "park")
    pub types: Vec<String>,

    /// Precise place coordinates
    pub location: Coordinates,

    /// Photo URL, when the provider exposes one
    pub photo_url: Option<String>,

    /// External deep-link to the place, when available
    pub maps_uri: Option<String>,
}

impl Candidate {
    /// Key used for first-occurrence-wins deduplication.
    ///
    /// Falls back to name+address when the provider omitted the place id.
    pub fn dedupe_key(&self) -> String {
        if self.place_id.is_empty() {
            format!("{}-{}", self.name, self.address)
        } else {
            self.place_id.clone()
        }
    }
}

/// Travel hint for an origin-destination pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteHint {
    /// Route length in meters, when reported
    pub distance_meters: Option<i64>,

    /// Human-readable distance (e.g. "1.2 km")
    pub distance_text: Option<String>,

    /// Travel time in seconds, when reported
    pub duration_seconds: Option<i64>,

    /// Human-readable duration (e.g. "15 mins")
    pub duration_text: Option<String>,
}
