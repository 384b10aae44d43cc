//! Inbound request model and validation

use lecarte::{Coordinates, TravelMode};
use serde::{Deserialize, Serialize};

/// Hard floor on returned recommendations
pub const MIN_RESULTS: usize = 3;

/// Hard ceiling on returned recommendations
pub const MAX_RESULTS: usize = 5;

/// Conversational role attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// General companion conversation
    Companion,

    /// Location-aware guide; the only role allowed to request places
    LocalGuide,

    /// Study companion
    StudyGuide,
}

impl Role {
    /// Wire representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Companion => "companion",
            Self::LocalGuide => "local_guide",
            Self::StudyGuide => "study_guide",
        }
    }
}

/// Rejections raised before any provider call is made
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// `user_id` was missing or blank
    #[error("user_id must not be empty")]
    MissingUserId,

    /// `query` was missing or blank
    #[error("query must not be empty")]
    EmptyQuery,

    /// The role is not allowed to request recommendations
    #[error("role '{0}' cannot request recommendations")]
    UnsupportedRole(String),

    /// Coordinates outside the valid latitude/longitude ranges
    #[error("coordinates out of range: ({latitude}, {longitude})")]
    InvalidCoordinates {
        /// Offending latitude
        latitude: String,
        /// Offending longitude
        longitude: String,
    },
}

/// One inbound recommendation call; immutable and never persisted here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Caller identity (opaque to this core)
    pub user_id: String,

    /// Conversational role; must be [`Role::LocalGuide`]
    #[serde(default = "default_role")]
    pub role: Role,

    /// Free-text query, treated as an opaque relevance token set
    pub query: String,

    /// Requesting user's latitude; used for searching, never echoed back
    pub latitude: f64,

    /// Requesting user's longitude; used for searching, never echoed back
    pub longitude: f64,

    /// Requested result count, clamped server-side to [3, 5]
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Optional preference tags matched against candidate categories
    #[serde(default)]
    pub preference_tags: Vec<String>,

    /// Travel mode for route hints
    #[serde(default)]
    pub travel_mode: TravelMode,
}

fn default_role() -> Role {
    Role::LocalGuide
}

fn default_max_results() -> usize {
    MAX_RESULTS
}

impl RecommendationRequest {
    /// Reject malformed requests before any provider call.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.user_id.trim().is_empty() {
            return Err(RequestError::MissingUserId);
        }
        if self.query.trim().is_empty() {
            return Err(RequestError::EmptyQuery);
        }
        if self.role != Role::LocalGuide {
            return Err(RequestError::UnsupportedRole(self.role.as_str().to_string()));
        }
        if !self.origin().is_valid() {
            return Err(RequestError::InvalidCoordinates {
                latitude: self.latitude.to_string(),
                longitude: self.longitude.to_string(),
            });
        }
        Ok(())
    }

    /// Requesting user's coordinates
    pub fn origin(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Requested result count clamped to [3, 5]
    pub fn effective_max_results(&self) -> usize {
        self.max_results.clamp(MIN_RESULTS, MAX_RESULTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request() -> RecommendationRequest {
        RecommendationRequest {
            user_id: "u-1".to_string(),
            role: Role::LocalGuide,
            query: "quiet cafe in Central".to_string(),
            latitude: 22.2819,
            longitude: 114.1589,
            max_results: 5,
            preference_tags: vec![],
            travel_mode: TravelMode::Walking,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_empty_query_rejected() {
        let mut req = request();
        req.query = "   ".to_string();
        assert_eq!(req.validate(), Err(RequestError::EmptyQuery));
    }

    #[test]
    fn test_blank_user_rejected() {
        let mut req = request();
        req.user_id = String::new();
        assert_eq!(req.validate(), Err(RequestError::MissingUserId));
    }

    #[test]
    fn test_non_guide_role_rejected() {
        let mut req = request();
        req.role = Role::Companion;
        assert_eq!(
            req.validate(),
            Err(RequestError::UnsupportedRole("companion".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let mut req = request();
        req.latitude = 91.0;
        assert!(matches!(
            req.validate(),
            Err(RequestError::InvalidCoordinates { .. })
        ));
    }

    #[rstest]
    #[case(0, 3)]
    #[case(1, 3)]
    #[case(3, 3)]
    #[case(4, 4)]
    #[case(5, 5)]
    #[case(10, 5)]
    fn test_max_results_clamped_both_ways(#[case] requested: usize, #[case] effective: usize) {
        let mut req = request();
        req.max_results = requested;
        assert_eq!(req.effective_max_results(), effective);
    }

    #[test]
    fn test_defaults_from_json() {
        let req: RecommendationRequest = serde_json::from_str(
            r#"{"user_id":"u-1","query":"cafe","latitude":22.3,"longitude":114.2}"#,
        )
        .unwrap();
        assert_eq!(req.role, Role::LocalGuide);
        assert_eq!(req.max_results, MAX_RESULTS);
        assert_eq!(req.travel_mode, TravelMode::Walking);
        assert!(req.preference_tags.is_empty());
    }

    #[test]
    fn test_unknown_travel_mode_rejected_by_serde() {
        let result: Result<RecommendationRequest, _> = serde_json::from_str(
            r#"{"user_id":"u-1","query":"cafe","latitude":22.3,"longitude":114.2,"travel_mode":"teleport"}"#,
        );
        assert!(result.is_err());
    }
}
