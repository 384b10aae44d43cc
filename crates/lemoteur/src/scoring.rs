//! Deterministic multi-factor scoring
//!
//! Every sub-score is clamped to [0, 1] before weighting and the weights
//! sum to 1, so the fit score is always in [0, 1]. The same request and
//! candidate set always produce the same scores and the same order: there
//! is no randomness and no time dependence anywhere in this module.

use lecarte::RouteHint;
use lemeteo::Condition;

use crate::aggregate::EnrichedCandidate;
use crate::request::RecommendationRequest;

/// Weight of query/candidate token overlap
pub const W_RELEVANCE: f64 = 0.25;

/// Weight of the rating + review-volume quality blend
pub const W_QUALITY: f64 = 0.35;

/// Weight of travel convenience
pub const W_CONVENIENCE: f64 = 0.20;

/// Weight of the weather/category fit
pub const W_WEATHER: f64 = 0.10;

/// Weight of preference tag overlap
pub const W_PREFERENCE: f64 = 0.10;

// Quality blends rating and review volume; the saturating log keeps sheer
// review volume from dominating a high-rating, low-volume place.
const QUALITY_RATING_SHARE: f64 = 0.6;
const QUALITY_REVIEW_SHARE: f64 = 0.4;

const NEUTRAL: f64 = 0.5;

/// Category tags that read as indoor places
pub const INDOOR_TYPES: [&str; 5] = ["cafe", "restaurant", "museum", "shopping_mall", "library"];

/// Category tags that read as outdoor places
pub const OUTDOOR_TYPES: [&str; 5] = [
    "park",
    "tourist_attraction",
    "campground",
    "hiking_area",
    "beach",
];

/// A candidate with its fit score and rationale, ready for assembly
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// The enriched candidate being ranked
    pub enriched: EnrichedCandidate,

    /// Overall suitability, always within [0, 1]
    pub fit_score: f64,

    /// Human-readable explanation of the dominant score components
    pub rationale: String,
}

/// Named score components, in the fixed tie-break order used for rationale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Relevance,
    Quality,
    Convenience,
    WeatherFit,
    Preference,
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn haystack(name: &str, types: &[String]) -> String {
    let mut haystack = name.to_lowercase();
    for tag in types {
        haystack.push(' ');
        haystack.push_str(&tag.to_lowercase());
    }
    haystack
}

/// Token-overlap fraction between the query and the candidate text
fn relevance_score(query: &str, haystack: &str) -> f64 {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return 0.0;
    }
    let overlaps = tokens.iter().filter(|t| haystack.contains(t.as_str())).count();
    clamp01(overlaps as f64 / tokens.len() as f64)
}

fn rating_score(rating: Option<f64>) -> f64 {
    match rating {
        Some(rating) => clamp01(rating / 5.0),
        None => 0.35,
    }
}

/// Saturating review-volume score: log10(count + 1) / 3, so ~1000 reviews
/// already score 1.0 and further volume adds nothing.
fn review_volume_score(review_count: Option<u32>) -> f64 {
    match review_count {
        Some(count) if count > 0 => clamp01(((count as f64) + 1.0).log10() / 3.0),
        _ => 0.1,
    }
}

fn quality_score(rating: Option<f64>, review_count: Option<u32>) -> f64 {
    clamp01(
        QUALITY_RATING_SHARE * rating_score(rating)
            + QUALITY_REVIEW_SHARE * review_volume_score(review_count),
    )
}

/// Inverse-normalized travel effort; neutral when no route data exists so
/// a missing route never penalizes a candidate.
fn convenience_score(route: Option<&RouteHint>) -> f64 {
    let Some(hint) = route else {
        return NEUTRAL;
    };
    if let Some(seconds) = hint.duration_seconds {
        if seconds <= 600 {
            return 1.0;
        }
        return clamp01(1.0 - seconds as f64 / 7200.0);
    }
    if let Some(meters) = hint.distance_meters {
        if meters <= 1000 {
            return 1.0;
        }
        return clamp01(1.0 - meters as f64 / 12000.0);
    }
    NEUTRAL
}

fn intersects(types: &[String], bucket: &[&str]) -> bool {
    types
        .iter()
        .any(|t| bucket.contains(&t.to_lowercase().as_str()))
}

/// Fixed lookup of (condition, category) to a bonus/penalty; neutral when
/// the weather signal is degraded.
fn weather_fit_score(condition: Condition, types: &[String]) -> f64 {
    if condition == Condition::Unknown {
        return NEUTRAL;
    }
    if condition.favors_indoor() {
        return if intersects(types, &INDOOR_TYPES) {
            1.0
        } else {
            0.45
        };
    }
    if condition.favors_outdoor() {
        return if intersects(types, &OUTDOOR_TYPES) {
            1.0
        } else {
            0.6
        };
    }
    // Cloudy and fog neither reward nor punish much either way
    0.7
}

/// Fraction of requested preference tags present in the candidate text;
/// neutral when the caller requested none.
fn preference_score(preference_tags: &[String], haystack: &str) -> f64 {
    if preference_tags.is_empty() {
        return NEUTRAL;
    }
    let matches = preference_tags
        .iter()
        .filter(|tag| haystack.contains(&tag.to_lowercase()))
        .count();
    clamp01(matches as f64 / preference_tags.len() as f64)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn component_phrase(
    component: Component,
    enriched: &EnrichedCandidate,
    condition: Condition,
) -> String {
    let route = enriched.route.as_ref();
    match component {
        Component::Relevance => "closely matches what you asked for".to_string(),
        Component::Quality => "has a strong review record".to_string(),
        Component::Convenience => {
            let distance = route.and_then(|r| r.distance_text.as_deref());
            let duration = route.and_then(|r| r.duration_text.as_deref());
            match (distance, duration) {
                (Some(distance), Some(duration)) => {
                    format!("is about {distance} away ({duration})")
                }
                (Some(distance), None) => format!("is about {distance} away"),
                _ => "is an easy trip from where you are".to_string(),
            }
        }
        Component::WeatherFit => {
            if condition.favors_indoor() && intersects(&enriched.candidate.types, &INDOOR_TYPES) {
                "offers shelter from the current weather".to_string()
            } else if condition.favors_outdoor()
                && intersects(&enriched.candidate.types, &OUTDOOR_TYPES)
            {
                "is a great fit for the weather outside".to_string()
            } else {
                "works in the current conditions".to_string()
            }
        }
        Component::Preference => "lines up with your preferences".to_string(),
    }
}

/// Score one enriched candidate against the request and weather context.
///
/// The rationale names the one or two components that contributed most,
/// never raw numbers.
pub fn score(
    enriched: &EnrichedCandidate,
    request: &RecommendationRequest,
    condition: Condition,
) -> (f64, String) {
    let candidate = &enriched.candidate;
    let haystack = haystack(&candidate.name, &candidate.types);

    let contributions = [
        (
            Component::Relevance,
            W_RELEVANCE * relevance_score(&request.query, &haystack),
        ),
        (
            Component::Quality,
            W_QUALITY * quality_score(candidate.rating, candidate.user_ratings_total),
        ),
        (
            Component::Convenience,
            W_CONVENIENCE * convenience_score(enriched.route.as_ref()),
        ),
        (
            Component::WeatherFit,
            W_WEATHER * weather_fit_score(condition, &candidate.types),
        ),
        (
            Component::Preference,
            W_PREFERENCE * preference_score(&request.preference_tags, &haystack),
        ),
    ];

    let fit_score = round4(clamp01(contributions.iter().map(|(_, c)| c).sum()));

    // Stable sort keeps the fixed component order on ties, so rationale
    // text is deterministic for identical inputs.
    let mut ranked = contributions;
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let reasons: Vec<String> = ranked
        .iter()
        .take(2)
        .map(|(component, _)| component_phrase(*component, enriched, condition))
        .collect();

    let rationale = format!("Matches '{}' with {}.", request.query.trim(), reasons.join(", "));

    (fit_score, rationale)
}

/// Score a batch and sort it into the response order: fit score descending,
/// then review count descending, then place id ascending.
pub fn score_and_rank(
    enriched: Vec<EnrichedCandidate>,
    request: &RecommendationRequest,
    condition: Condition,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = enriched
        .into_iter()
        .map(|enriched| {
            let (fit_score, rationale) = score(&enriched, request, condition);
            ScoredCandidate {
                enriched,
                fit_score,
                rationale,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.fit_score
            .total_cmp(&a.fit_score)
            .then_with(|| {
                let a_reviews = a.enriched.candidate.user_ratings_total.unwrap_or(0);
                let b_reviews = b.enriched.candidate.user_ratings_total.unwrap_or(0);
                b_reviews.cmp(&a_reviews)
            })
            .then_with(|| {
                a.enriched
                    .candidate
                    .place_id
                    .cmp(&b.enriched.candidate.place_id)
            })
    });

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use lecarte::{Candidate, Coordinates, TravelMode};
    use crate::request::Role;

    fn candidate(id: &str, name: &str, types: &[&str]) -> Candidate {
        Candidate {
            place_id: id.to_string(),
            name: name.to_string(),
            address: "Central".to_string(),
            rating: Some(4.5),
            user_ratings_total: Some(200),
            types: types.iter().map(|t| t.to_string()).collect(),
            location: Coordinates::new(22.28, 114.16),
            photo_url: None,
            maps_uri: None,
        }
    }

    fn request(query: &str) -> RecommendationRequest {
        RecommendationRequest {
            user_id: "u-1".to_string(),
            role: Role::LocalGuide,
            query: query.to_string(),
            latitude: 22.2819,
            longitude: 114.1589,
            max_results: 5,
            preference_tags: vec![],
            travel_mode: TravelMode::Walking,
        }
    }

    fn enriched(candidate: Candidate) -> EnrichedCandidate {
        EnrichedCandidate::bare(candidate)
    }

    #[test]
    fn test_fit_score_in_unit_interval() {
        let item = enriched(candidate("a", "Quiet Cafe", &["cafe"]));
        let (fit, rationale) = score(&item, &request("quiet cafe"), Condition::Rain);
        assert!((0.0..=1.0).contains(&fit));
        assert!(!rationale.is_empty());
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let item = enriched(candidate("a", "Quiet Cafe", &["cafe"]));
        let req = request("quiet cafe");
        let first = score(&item, &req, Condition::Rain);
        let second = score(&item, &req, Condition::Rain);
        assert_eq!(first.0.to_bits(), second.0.to_bits());
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn test_rain_penalizes_outdoor_over_indoor() {
        let indoor = enriched(candidate("a", "Harbour Museum", &["museum"]));
        let outdoor = enriched(candidate("b", "Victoria Park", &["park"]));
        assert!(
            weather_fit_score(Condition::Rain, &indoor.candidate.types)
                > weather_fit_score(Condition::Rain, &outdoor.candidate.types)
        );
    }

    #[test]
    fn test_unknown_weather_is_neutral() {
        assert_eq!(
            weather_fit_score(Condition::Unknown, &["park".to_string()]),
            NEUTRAL
        );
        assert_eq!(
            weather_fit_score(Condition::Unknown, &["cafe".to_string()]),
            NEUTRAL
        );
    }

    #[test]
    fn test_clear_weather_boosts_outdoor() {
        assert_eq!(
            weather_fit_score(Condition::Clear, &["park".to_string()]),
            1.0
        );
        assert_eq!(
            weather_fit_score(Condition::Clear, &["cafe".to_string()]),
            0.6
        );
    }

    #[test]
    fn test_missing_route_is_neutral_not_penalty() {
        assert_eq!(convenience_score(None), NEUTRAL);
        let empty = RouteHint {
            distance_meters: None,
            distance_text: None,
            duration_seconds: None,
            duration_text: None,
        };
        assert_eq!(convenience_score(Some(&empty)), NEUTRAL);
    }

    #[test]
    fn test_shorter_trips_score_higher() {
        let near = RouteHint {
            distance_meters: Some(500),
            distance_text: None,
            duration_seconds: Some(300),
            duration_text: None,
        };
        let far = RouteHint {
            distance_meters: Some(9000),
            distance_text: None,
            duration_seconds: Some(5400),
            duration_text: None,
        };
        assert!(convenience_score(Some(&near)) > convenience_score(Some(&far)));
        assert_eq!(convenience_score(Some(&near)), 1.0);
    }

    #[test]
    fn test_review_volume_saturates() {
        let low = review_volume_score(Some(50));
        let mid = review_volume_score(Some(1_000));
        let huge = review_volume_score(Some(1_000_000));
        assert!(low < mid);
        assert_eq!(mid, 1.0);
        assert_eq!(huge, 1.0);
    }

    #[test]
    fn test_volume_cannot_buy_back_a_poor_rating() {
        let boutique = quality_score(Some(4.9), Some(12));
        let mill = quality_score(Some(2.0), Some(100_000));
        assert!(boutique > mill);
    }

    #[test]
    fn test_no_preferences_is_neutral() {
        assert_eq!(preference_score(&[], "cafe food"), NEUTRAL);
        let tags = vec!["cafe".to_string(), "vegan".to_string()];
        assert_eq!(preference_score(&tags, "quiet cafe food"), 0.5);
        assert_eq!(preference_score(&tags, "vegan cafe"), 1.0);
    }

    #[test]
    fn test_relevance_is_token_overlap_fraction() {
        assert_eq!(relevance_score("quiet cafe", "the quiet cafe cafe food"), 1.0);
        assert_eq!(relevance_score("quiet cafe", "noisy bar"), 0.0);
        assert_eq!(relevance_score("", "anything"), 0.0);
    }

    #[test]
    fn test_ordering_tie_breaks_are_total() {
        let mut a = candidate("zzz", "Cafe A", &["cafe"]);
        let mut b = candidate("aaa", "Cafe B", &["cafe"]);
        a.user_ratings_total = Some(200);
        b.user_ratings_total = Some(200);

        let ranked = score_and_rank(
            vec![enriched(a), enriched(b)],
            &request("cafe"),
            Condition::Cloudy,
        );
        // Identical scores and review counts fall back to place id ascending
        assert_eq!(ranked[0].enriched.candidate.place_id, "aaa");
        assert_eq!(ranked[1].enriched.candidate.place_id, "zzz");
    }

    #[test]
    fn test_rank_is_descending_by_fit() {
        let strong = candidate("a", "Quiet Cafe Central", &["cafe"]);
        let mut weak = candidate("b", "Hardware Store", &["hardware_store"]);
        weak.rating = Some(2.0);
        weak.user_ratings_total = Some(3);

        let ranked = score_and_rank(
            vec![enriched(weak), enriched(strong)],
            &request("quiet cafe central"),
            Condition::Rain,
        );
        assert_eq!(ranked[0].enriched.candidate.place_id, "a");
        assert!(ranked[0].fit_score > ranked[1].fit_score);
    }

    #[test]
    fn test_rationale_mentions_travel_hint_when_dominant() {
        let mut item = enriched(candidate("a", "Quiet Cafe", &["cafe"]));
        item.route = Some(RouteHint {
            distance_meters: Some(400),
            distance_text: Some("0.4 km".to_string()),
            duration_seconds: Some(240),
            duration_text: Some("4 mins".to_string()),
        });
        let (_, rationale) = score(&item, &request("quiet cafe"), Condition::Rain);
        assert!(rationale.starts_with("Matches 'quiet cafe'"));
        assert!(!rationale.contains("0.25"), "rationale must not echo weights");
    }
}
