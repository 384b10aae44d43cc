//! Google Maps Text Search and Directions adapter

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::provider::{Directions, PlaceSearch, ProviderError};
use crate::types::{Candidate, Coordinates, RouteHint, TravelMode};

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
const PHOTO_URL: &str = "https://maps.googleapis.com/maps/api/place/photo";

const PROVIDER_NAME: &str = "google-maps";

/// Connection parameters for the Google Maps adapter
#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    /// API key; the adapter is never constructed without one
    pub api_key: String,

    /// Result language (e.g. "en")
    pub language: String,

    /// Region bias (e.g. "hk")
    pub region: String,

    /// Search radius in meters
    pub radius_meters: u32,

    /// Max width requested for photo URLs
    pub photo_max_width: u32,

    /// Per-call timeout
    pub timeout: Duration,
}

/// Live Google Maps adapter implementing both capabilities
pub struct GoogleMapsProvider {
    config: GoogleMapsConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct Geometry {
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    photo_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    place_id: Option<String>,
    name: Option<String>,
    formatted_address: Option<String>,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    geometry: Geometry,
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct TextSearchPayload {
    status: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: Option<i64>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct Route {
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsPayload {
    status: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

impl GoogleMapsProvider {
    /// Create the adapter; fails only when the HTTP client cannot be built
    pub fn new(config: GoogleMapsConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(Self { config, client })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e, "google maps request failed");
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Unavailable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ProviderError::Upstream(format!(
                "status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Upstream(e.to_string()))
    }

    fn photo_url(&self, photo_reference: Option<&str>) -> Option<String> {
        let reference = photo_reference?;
        if reference.is_empty() {
            return None;
        }
        Some(format!(
            "{PHOTO_URL}?maxwidth={}&photo_reference={}&key={}",
            self.config.photo_max_width, reference, self.config.api_key
        ))
    }

    fn into_candidate(&self, item: PlaceResult) -> Option<Candidate> {
        let location = item.geometry.location?;
        let (latitude, longitude) = (location.lat?, location.lng?);

        let place_id = item.place_id.unwrap_or_default();
        let maps_uri = (!place_id.is_empty())
            .then(|| format!("https://www.google.com/maps/place/?q=place_id:{place_id}"));
        let photo_reference = item
            .photos
            .first()
            .and_then(|p| p.photo_reference.as_deref());

        Some(Candidate {
            photo_url: self.photo_url(photo_reference),
            maps_uri,
            place_id,
            name: item.name.unwrap_or_else(|| "Unknown place".to_string()),
            address: item
                .formatted_address
                .unwrap_or_else(|| "Address unavailable".to_string()),
            rating: item.rating,
            user_ratings_total: item.user_ratings_total,
            types: item.types,
            location: Coordinates::new(latitude, longitude),
        })
    }
}

#[async_trait]
impl PlaceSearch for GoogleMapsProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn search_places(
        &self,
        query: &str,
        origin: Coordinates,
        max_results: usize,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let payload: TextSearchPayload = self
            .get_json(
                TEXT_SEARCH_URL,
                &[
                    ("query", query.to_string()),
                    (
                        "location",
                        format!("{},{}", origin.latitude, origin.longitude),
                    ),
                    ("radius", self.config.radius_meters.to_string()),
                    ("language", self.config.language.clone()),
                    ("region", self.config.region.clone()),
                    ("key", self.config.api_key.clone()),
                ],
            )
            .await?;

        match payload.status.as_deref() {
            Some("OK") => {}
            Some("ZERO_RESULTS") => return Ok(Vec::new()),
            status => {
                warn!(?status, query, "google maps text search unexpected status");
                return Err(ProviderError::Upstream(format!(
                    "text search status {status:?}"
                )));
            }
        }

        Ok(payload
            .results
            .into_iter()
            .take(max_results)
            .filter_map(|item| self.into_candidate(item))
            .collect())
    }
}

#[async_trait]
impl Directions for GoogleMapsProvider {
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<RouteHint, ProviderError> {
        let payload: DirectionsPayload = self
            .get_json(
                DIRECTIONS_URL,
                &[
                    (
                        "origin",
                        format!("{},{}", origin.latitude, origin.longitude),
                    ),
                    (
                        "destination",
                        format!("{},{}", destination.latitude, destination.longitude),
                    ),
                    ("mode", mode.as_str().to_string()),
                    ("region", self.config.region.clone()),
                    ("language", self.config.language.clone()),
                    ("key", self.config.api_key.clone()),
                ],
            )
            .await?;

        if payload.status.as_deref() != Some("OK") {
            return Err(ProviderError::Upstream(format!(
                "directions status {:?}",
                payload.status
            )));
        }

        let leg = payload
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.legs.into_iter().next())
            .ok_or_else(|| ProviderError::Upstream("directions returned no legs".to_string()))?;

        Ok(RouteHint {
            distance_meters: leg.distance.as_ref().and_then(|d| d.value),
            distance_text: leg.distance.and_then(|d| d.text),
            duration_seconds: leg.duration.as_ref().and_then(|d| d.value),
            duration_text: leg.duration.and_then(|d| d.text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GoogleMapsProvider {
        GoogleMapsProvider::new(GoogleMapsConfig {
            api_key: "test-key".to_string(),
            language: "en".to_string(),
            region: "hk".to_string(),
            radius_meters: 5000,
            photo_max_width: 800,
            timeout: Duration::from_secs(6),
        })
        .expect("build provider")
    }

    #[test]
    fn test_candidate_mapping() {
        let payload: TextSearchPayload = serde_json::from_str(
            r#"{
                "status": "OK",
                "results": [{
                    "place_id": "p1",
                    "name": "Harbour Cafe",
                    "formatted_address": "1 Connaught Rd",
                    "rating": 4.5,
                    "user_ratings_total": 320,
                    "types": ["cafe", "food"],
                    "geometry": {"location": {"lat": 22.28, "lng": 114.16}},
                    "photos": [{"photo_reference": "ref-1"}]
                }]
            }"#,
        )
        .unwrap();

        let provider = provider();
        let candidate = provider
            .into_candidate(payload.results.into_iter().next().unwrap())
            .unwrap();
        assert_eq!(candidate.place_id, "p1");
        assert_eq!(candidate.rating, Some(4.5));
        assert_eq!(candidate.user_ratings_total, Some(320));
        assert_eq!(
            candidate.maps_uri.as_deref(),
            Some("https://www.google.com/maps/place/?q=place_id:p1")
        );
        assert!(candidate
            .photo_url
            .as_deref()
            .unwrap()
            .contains("photo_reference=ref-1"));
    }

    #[test]
    fn test_candidate_without_location_dropped() {
        let item: PlaceResult =
            serde_json::from_str(r#"{"place_id": "p2", "name": "No Geometry"}"#).unwrap();
        assert!(provider().into_candidate(item).is_none());
    }

    #[test]
    fn test_directions_payload_parsing() {
        let payload: DirectionsPayload = serde_json::from_str(
            r#"{
                "status": "OK",
                "routes": [{"legs": [{
                    "distance": {"value": 1200, "text": "1.2 km"},
                    "duration": {"value": 900, "text": "15 mins"}
                }]}]
            }"#,
        )
        .unwrap();
        let leg = &payload.routes[0].legs[0];
        assert_eq!(leg.distance.as_ref().unwrap().value, Some(1200));
        assert_eq!(leg.duration.as_ref().unwrap().text.as_deref(), Some("15 mins"));
    }

    #[test]
    fn test_photo_url_requires_reference() {
        let provider = provider();
        assert!(provider.photo_url(None).is_none());
        assert!(provider.photo_url(Some("")).is_none());
        assert!(provider.photo_url(Some("abc")).unwrap().contains("maxwidth=800"));
    }
}
