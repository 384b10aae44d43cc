//! Normalized weather condition vocabulary

use serde::{Deserialize, Serialize};

/// Weather condition normalized from upstream WMO weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Clear sky
    Clear,

    /// Mainly clear or partly cloudy
    PartlyCloudy,

    /// Overcast
    Cloudy,

    /// Fog or depositing rime fog
    Fog,

    /// Drizzle, including freezing drizzle
    Drizzle,

    /// Rain, freezing rain, and rain showers
    Rain,

    /// Snowfall, snow grains, and snow showers
    Snow,

    /// Thunderstorm, with or without hail
    Thunderstorm,

    /// Unmapped code or missing observation
    #[default]
    Unknown,
}

impl Condition {
    /// Normalize a WMO weather code into a condition.
    ///
    /// Unlisted codes and a missing code both map to [`Condition::Unknown`].
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Clear,
            Some(1) | Some(2) => Self::PartlyCloudy,
            Some(3) => Self::Cloudy,
            Some(45) | Some(48) => Self::Fog,
            Some(51) | Some(53) | Some(55) | Some(56) | Some(57) => Self::Drizzle,
            Some(61) | Some(63) | Some(65) | Some(66) | Some(67) | Some(80) | Some(81)
            | Some(82) => Self::Rain,
            Some(71) | Some(73) | Some(75) | Some(77) | Some(85) | Some(86) => Self::Snow,
            Some(95) | Some(96) | Some(99) => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Wire representation of the condition
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly_cloudy",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
            Self::Unknown => "unknown",
        }
    }

    /// Conditions that favor staying indoors
    pub fn favors_indoor(&self) -> bool {
        matches!(
            self,
            Self::Rain | Self::Drizzle | Self::Thunderstorm | Self::Snow
        )
    }

    /// Conditions that favor being outdoors
    pub fn favors_outdoor(&self) -> bool {
        matches!(self, Self::Clear | Self::PartlyCloudy)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Condition::Clear)]
    #[case(1, Condition::PartlyCloudy)]
    #[case(2, Condition::PartlyCloudy)]
    #[case(3, Condition::Cloudy)]
    #[case(45, Condition::Fog)]
    #[case(48, Condition::Fog)]
    #[case(51, Condition::Drizzle)]
    #[case(53, Condition::Drizzle)]
    #[case(55, Condition::Drizzle)]
    #[case(56, Condition::Drizzle)]
    #[case(57, Condition::Drizzle)]
    #[case(61, Condition::Rain)]
    #[case(63, Condition::Rain)]
    #[case(65, Condition::Rain)]
    #[case(66, Condition::Rain)]
    #[case(67, Condition::Rain)]
    #[case(80, Condition::Rain)]
    #[case(81, Condition::Rain)]
    #[case(82, Condition::Rain)]
    #[case(71, Condition::Snow)]
    #[case(73, Condition::Snow)]
    #[case(75, Condition::Snow)]
    #[case(77, Condition::Snow)]
    #[case(85, Condition::Snow)]
    #[case(86, Condition::Snow)]
    #[case(95, Condition::Thunderstorm)]
    #[case(96, Condition::Thunderstorm)]
    #[case(99, Condition::Thunderstorm)]
    fn test_code_table_exact(#[case] code: i32, #[case] expected: Condition) {
        assert_eq!(Condition::from_code(Some(code)), expected);
    }

    #[rstest]
    #[case(Some(42))]
    #[case(Some(-1))]
    #[case(None)]
    fn test_unmapped_code_is_unknown(#[case] code: Option<i32>) {
        assert_eq!(Condition::from_code(code), Condition::Unknown);
    }

    #[test]
    fn test_wire_representation() {
        assert_eq!(Condition::PartlyCloudy.as_str(), "partly_cloudy");
        assert_eq!(Condition::Thunderstorm.to_string(), "thunderstorm");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Condition::PartlyCloudy).unwrap();
        assert_eq!(json, "\"partly_cloudy\"");
        let back: Condition = serde_json::from_str("\"rain\"").unwrap();
        assert_eq!(back, Condition::Rain);
    }

    #[test]
    fn test_indoor_outdoor_buckets() {
        assert!(Condition::Rain.favors_indoor());
        assert!(Condition::Snow.favors_indoor());
        assert!(!Condition::Cloudy.favors_indoor());
        assert!(Condition::Clear.favors_outdoor());
        assert!(!Condition::Unknown.favors_outdoor());
    }
}
