//! Risk stratification and recommendation generation.
//!
//! Maps the composite grade/score to a stratification category, attaches the
//! category's fixed follow-up interval and recommendation list, and appends
//! conditional lifestyle/monitoring recommendations driven by the raw
//! reading (blood pressure at or above 140/90, saturation below 95%).

use serde::{Deserialize, Serialize};
use vhd_types::{FollowUpInterval, Grade, RiskCategory};

use crate::composite::CompositeScore;
use crate::reading::VitalReading;

/// Stratified risk plus the follow-up plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskStratification {
    pub category: RiskCategory,
    pub follow_up_interval: FollowUpInterval,
    pub recommendations: Vec<String>,
}

/// Maps a composite result to its stratification category.
///
/// Either the grade or the raw score can force a tier; the more severe
/// interpretation wins.
pub fn risk_category_for(composite: &CompositeScore) -> RiskCategory {
    if composite.grade == Grade::Critical || composite.score < 0.4 {
        RiskCategory::VeryHigh
    } else if composite.grade == Grade::Poor || composite.score < 0.6 {
        RiskCategory::High
    } else if composite.grade == Grade::Fair || composite.score < 0.8 {
        RiskCategory::Moderate
    } else {
        RiskCategory::Low
    }
}

fn base_recommendations(category: RiskCategory) -> Vec<String> {
    let lines: &[&str] = match category {
        RiskCategory::VeryHigh => &[
            "Seek medical review promptly and re-measure all vital signs daily",
            "Do not adjust any medication without professional advice",
            "Keep a written log of readings to share with your clinician",
        ],
        RiskCategory::High => &[
            "Arrange a medical review within the week",
            "Re-measure the flagged vital signs weekly and log the results",
            "Reduce salt, caffeine, and alcohol intake in the meantime",
        ],
        RiskCategory::Moderate => &[
            "Re-measure monthly and watch for a worsening trend",
            "Maintain regular light exercise and a balanced diet",
        ],
        RiskCategory::Low => &[
            "Readings look healthy; re-measure quarterly",
            "Keep up current lifestyle habits",
        ],
    };
    lines.iter().map(|s| (*s).to_owned()).collect()
}

fn conditional_recommendations(reading: &VitalReading) -> Vec<String> {
    let mut extra = Vec::new();

    if let Some(bp) = &reading.blood_pressure {
        if bp.systolic >= 140.0 || bp.diastolic >= 90.0 {
            extra.push(
                "Blood pressure is elevated: limit sodium to under 5 g/day, avoid \
                 late-evening meals, and measure at the same time each day"
                    .to_owned(),
            );
            extra.push(
                "Measure seated, after five minutes of rest, with the cuff at heart \
                 level"
                    .to_owned(),
            );
        }
    }

    if let Some(ox) = &reading.oximetry {
        if ox.percent < 95.0 {
            extra.push(
                "Oxygen saturation is reduced: ventilate the room, practise slow \
                 deep breathing, and re-measure after a few minutes"
                    .to_owned(),
            );
            extra.push(
                "If saturation stays below 95% at rest, seek medical advice".to_owned(),
            );
        }
    }

    extra
}

/// Builds the stratification for one assessment.
pub fn stratify(composite: &CompositeScore, reading: &VitalReading) -> RiskStratification {
    let category = risk_category_for(composite);
    let mut recommendations = base_recommendations(category);
    recommendations.extend(conditional_recommendations(reading));

    RiskStratification {
        category,
        follow_up_interval: category.follow_up_interval(),
        recommendations,
    }
}
