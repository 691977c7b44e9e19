//! Shared value types for the VHD health dashboard.
//!
//! These enums form the vocabulary of the scoring engine: risk tiers, grades,
//! stratification categories, follow-up intervals, and temperature measurement
//! sites. They are plain value objects with serde wire representations and no
//! behaviour beyond fixed total mappings.

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing shared value types from strings.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The input string did not name a known temperature measurement site.
    #[error("unknown temperature site: {0}")]
    UnknownSite(String),
}

/// Per-vital-sign risk tier, ordered from least to most severe.
///
/// The derived `Ord` follows declaration order, so tier comparisons such as
/// "take the more severe of systolic and diastolic" are plain `max` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    LowModerate,
    Moderate,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Fixed total mapping from risk tier to a number in [0,1].
    ///
    /// Used by the temperature-pulse synergy rubric, which averages the two
    /// tiers. Every variant maps to exactly one value.
    pub fn as_number(self) -> f64 {
        match self {
            RiskLevel::Low => 0.1,
            RiskLevel::LowModerate => 0.3,
            RiskLevel::Moderate => 0.5,
            RiskLevel::High => 0.7,
            RiskLevel::VeryHigh => 0.9,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::LowModerate => "low_moderate",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        };
        write!(f, "{s}")
    }
}

/// Overall grade derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Grade::Excellent => "excellent",
            Grade::Good => "good",
            Grade::Fair => "fair",
            Grade::Poor => "poor",
            Grade::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// Risk stratification category for the whole assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskCategory {
    /// The follow-up interval attached to each stratification category.
    ///
    /// A fixed total mapping: every category has exactly one interval.
    pub fn follow_up_interval(self) -> FollowUpInterval {
        match self {
            RiskCategory::Low => FollowUpInterval::Quarterly,
            RiskCategory::Moderate => FollowUpInterval::Monthly,
            RiskCategory::High => FollowUpInterval::Weekly,
            RiskCategory::VeryHigh => FollowUpInterval::Daily,
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskCategory::Low => "low",
            RiskCategory::Moderate => "moderate",
            RiskCategory::High => "high",
            RiskCategory::VeryHigh => "very_high",
        };
        write!(f, "{s}")
    }
}

/// How soon the next assessment should happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpInterval {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl std::fmt::Display for FollowUpInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FollowUpInterval::Daily => "daily",
            FollowUpInterval::Weekly => "weekly",
            FollowUpInterval::Monthly => "monthly",
            FollowUpInterval::Quarterly => "quarterly",
        };
        write!(f, "{s}")
    }
}

/// Body site where a temperature was measured.
///
/// Each site has its own normal range (thermometer placement changes the
/// expected reading by several tenths of a degree). Device records name the
/// site in English or Chinese; [`TemperatureSite::parse`] accepts both and
/// unknown sites fall back to axillary at the normalisation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureSite {
    Axillary,
    Oral,
    Rectal,
    Ear,
    Forehead,
}

impl TemperatureSite {
    /// Parses a site label from a device record.
    ///
    /// Accepts the English site keys and the Chinese labels that consumer
    /// thermometers emit. Matching is case-insensitive on the ASCII keys.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::UnknownSite` if the label matches no known site.
    /// Callers that want the documented default should map the error to
    /// [`TemperatureSite::Axillary`].
    pub fn parse(label: &str) -> Result<Self, TypeError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "axillary" | "armpit" | "腋下" | "腋温" => Ok(TemperatureSite::Axillary),
            "oral" | "mouth" | "口腔" | "口温" => Ok(TemperatureSite::Oral),
            "rectal" | "直肠" | "肛温" => Ok(TemperatureSite::Rectal),
            "ear" | "tympanic" | "耳温" | "耳" => Ok(TemperatureSite::Ear),
            "forehead" | "temporal" | "额头" | "额温" => Ok(TemperatureSite::Forehead),
            other => Err(TypeError::UnknownSite(other.to_owned())),
        }
    }
}

impl std::fmt::Display for TemperatureSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TemperatureSite::Axillary => "axillary",
            TemperatureSite::Oral => "oral",
            TemperatureSite::Rectal => "rectal",
            TemperatureSite::Ear => "ear",
            TemperatureSite::Forehead => "forehead",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering_follows_severity() {
        assert!(RiskLevel::Low < RiskLevel::LowModerate);
        assert!(RiskLevel::LowModerate < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::VeryHigh);
    }

    #[test]
    fn test_risk_level_as_number_is_total_and_monotonic() {
        let tiers = [
            RiskLevel::Low,
            RiskLevel::LowModerate,
            RiskLevel::Moderate,
            RiskLevel::High,
            RiskLevel::VeryHigh,
        ];
        for pair in tiers.windows(2) {
            assert!(pair[0].as_number() < pair[1].as_number());
        }
        for tier in tiers {
            assert!((0.0..=1.0).contains(&tier.as_number()));
        }
    }

    #[test]
    fn test_follow_up_interval_mapping() {
        assert_eq!(
            RiskCategory::VeryHigh.follow_up_interval(),
            FollowUpInterval::Daily
        );
        assert_eq!(
            RiskCategory::High.follow_up_interval(),
            FollowUpInterval::Weekly
        );
        assert_eq!(
            RiskCategory::Moderate.follow_up_interval(),
            FollowUpInterval::Monthly
        );
        assert_eq!(
            RiskCategory::Low.follow_up_interval(),
            FollowUpInterval::Quarterly
        );
    }

    #[test]
    fn test_temperature_site_parse_accepts_chinese_labels() {
        assert_eq!(
            TemperatureSite::parse("腋下").unwrap(),
            TemperatureSite::Axillary
        );
        assert_eq!(
            TemperatureSite::parse("耳温").unwrap(),
            TemperatureSite::Ear
        );
        assert_eq!(
            TemperatureSite::parse("Oral").unwrap(),
            TemperatureSite::Oral
        );
    }

    #[test]
    fn test_temperature_site_parse_rejects_unknown() {
        let err = TemperatureSite::parse("wrist").expect_err("should reject unknown site");
        assert!(matches!(err, TypeError::UnknownSite(s) if s == "wrist"));
    }

    #[test]
    fn test_serde_wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::VeryHigh).unwrap(),
            "\"very_high\""
        );
        assert_eq!(
            serde_json::to_string(&Grade::Excellent).unwrap(),
            "\"excellent\""
        );
        assert_eq!(
            serde_json::to_string(&TemperatureSite::Forehead).unwrap(),
            "\"forehead\""
        );
    }
}
