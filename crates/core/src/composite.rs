//! Composite scorer: weighted average of sub-model scores.
//!
//! Missing sub-models are excluded from both the numerator and the
//! denominator; they never count as zero. When every sub-model is absent the
//! composite is defined as score 0 with confidence 0 (no division by zero).

use serde::{Deserialize, Serialize};
use vhd_types::Grade;

use crate::submodel::{
    PerfusionAssessment, Scored, StabilityAssessment, SubModelResult, SynergyAssessment,
};
use crate::{AssessmentError, AssessmentResult};

/// Named weight configuration for the three sub-models.
///
/// Overridable as a whole (scoring presets) but validated: weights must be
/// finite, non-negative, and not all zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubModelWeights {
    pub blood_pressure_stability: f64,
    pub blood_oxygen_perfusion: f64,
    pub temperature_pulse_synergy: f64,
}

impl Default for SubModelWeights {
    fn default() -> Self {
        Self {
            blood_pressure_stability: 0.35,
            blood_oxygen_perfusion: 0.25,
            temperature_pulse_synergy: 0.40,
        }
    }
}

impl SubModelWeights {
    /// Checks the weight table is usable.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::InvalidWeights` if any weight is negative or
    /// non-finite, or if all three are zero.
    pub fn validate(&self) -> AssessmentResult<()> {
        let entries = [
            ("blood_pressure_stability", self.blood_pressure_stability),
            ("blood_oxygen_perfusion", self.blood_oxygen_perfusion),
            ("temperature_pulse_synergy", self.temperature_pulse_synergy),
        ];
        for (name, weight) in entries {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AssessmentError::InvalidWeights(format!(
                    "{name} must be a finite non-negative number, got {weight}"
                )));
            }
        }
        if entries.iter().all(|(_, w)| *w == 0.0) {
            return Err(AssessmentError::InvalidWeights(
                "at least one sub-model weight must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Per-sub-model line in the composite breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub sub_model: String,
    pub weight: f64,
    /// `None` when the sub-model had insufficient data and was excluded.
    pub score: Option<f64>,
}

/// The weighted composite over the sub-models present in one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Weighted average over present sub-models, in [0,1].
    pub score: f64,
    pub grade: Grade,
    /// Share of total weight actually present, as a percentage in [0,100].
    pub confidence: f64,
    pub weights: SubModelWeights,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Grade thresholds over the composite score.
pub fn grade_for(score: f64) -> Grade {
    if score >= 0.9 {
        Grade::Excellent
    } else if score >= 0.8 {
        Grade::Good
    } else if score >= 0.6 {
        Grade::Fair
    } else if score >= 0.4 {
        Grade::Poor
    } else {
        Grade::Critical
    }
}

/// Combines the three sub-model results into the composite score.
pub fn composite_score(
    stability: &SubModelResult<StabilityAssessment>,
    perfusion: &SubModelResult<PerfusionAssessment>,
    synergy: &SubModelResult<SynergyAssessment>,
    weights: &SubModelWeights,
) -> CompositeScore {
    fn entry<A: Scored>(
        name: &str,
        result: &SubModelResult<A>,
        weight: f64,
    ) -> BreakdownEntry {
        BreakdownEntry {
            sub_model: name.to_owned(),
            weight,
            score: result.contributing_score(),
        }
    }

    let breakdown = vec![
        entry(
            "blood_pressure_stability",
            stability,
            weights.blood_pressure_stability,
        ),
        entry(
            "blood_oxygen_perfusion",
            perfusion,
            weights.blood_oxygen_perfusion,
        ),
        entry(
            "temperature_pulse_synergy",
            synergy,
            weights.temperature_pulse_synergy,
        ),
    ];

    let mut weighted_sum = 0.0;
    let mut present_weight = 0.0;
    for line in &breakdown {
        if let Some(score) = line.score {
            weighted_sum += score * line.weight;
            present_weight += line.weight;
        }
    }

    let score = if present_weight > 0.0 {
        (weighted_sum / present_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    CompositeScore {
        score,
        grade: grade_for(score),
        confidence: (present_weight * 100.0).min(100.0),
        weights: *weights,
        breakdown,
    }
}
