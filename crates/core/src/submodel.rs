//! Sub-model evaluators.
//!
//! Three evaluators, each producing a normalised score in [0,1] plus a
//! qualitative label. Every rubric starts from a base score of 0.5, applies
//! additive adjustments, and clamps. A sub-model whose inputs are missing
//! reports an insufficient-data sentinel with score 0 and is excluded from
//! the composite (both numerator and denominator).

use serde::{Deserialize, Serialize};

use crate::classify::{
    PulseCategory, PulseClassification, TemperatureCategory, TemperatureClassification,
    VitalClassification,
};
use crate::reading::{BloodPressureSample, OximetrySample};

const BASE_SCORE: f64 = 0.5;

fn clamp_unit(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

/// Outcome of one sub-model evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubModelResult<A> {
    /// The sub-model's required inputs were absent. Score is fixed at 0 and
    /// the sub-model contributes no weight to the composite.
    InsufficientData { score: f64 },
    /// The sub-model was evaluated.
    Evaluated(A),
}

impl<A> SubModelResult<A> {
    pub fn insufficient() -> Self {
        SubModelResult::InsufficientData { score: 0.0 }
    }

    /// The score to feed into the composite, `None` when insufficient.
    pub fn contributing_score(&self) -> Option<f64>
    where
        A: Scored,
    {
        match self {
            SubModelResult::InsufficientData { .. } => None,
            SubModelResult::Evaluated(a) => Some(a.score()),
        }
    }

    pub fn assessment(&self) -> Option<&A> {
        match self {
            SubModelResult::InsufficientData { .. } => None,
            SubModelResult::Evaluated(a) => Some(a),
        }
    }
}

/// Access to the normalised score of an evaluated sub-model.
pub trait Scored {
    fn score(&self) -> f64;
}

/// Generic three-step tier used by the stability rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityLabel {
    Stable,
    Moderate,
    Unstable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariabilityTier {
    Low,
    Moderate,
    High,
}

/// Blood-pressure-stability sub-model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityAssessment {
    pub score: f64,
    pub label: StabilityLabel,
    pub variability: VariabilityTier,
    /// Pulse-pressure variability coefficient, in percent.
    pub variability_coefficient: f64,
}

impl Scored for StabilityAssessment {
    fn score(&self) -> f64 {
        self.score
    }
}

/// Evaluates blood-pressure stability.
///
/// The variability coefficient is `|systolic - diastolic| / mean × 100`.
/// Stability is the same quantity read as a ratio. Adjustments:
/// stability stable/moderate/unstable → +0.3/+0.1/−0.2, variability
/// low/moderate/high → +0.2/+0.1/−0.1.
pub fn evaluate_blood_pressure_stability(
    sample: Option<&BloodPressureSample>,
) -> SubModelResult<StabilityAssessment> {
    let Some(sample) = sample else {
        return SubModelResult::insufficient();
    };

    let mean = (sample.systolic + sample.diastolic) / 2.0;
    let cv = (sample.systolic - sample.diastolic).abs() / mean * 100.0;

    let variability = if cv < 10.0 {
        VariabilityTier::Low
    } else if cv < 20.0 {
        VariabilityTier::Moderate
    } else {
        VariabilityTier::High
    };

    let ratio = cv / 100.0;
    let label = if ratio < 0.1 {
        StabilityLabel::Stable
    } else if ratio < 0.2 {
        StabilityLabel::Moderate
    } else {
        StabilityLabel::Unstable
    };

    let stability_adjustment = match label {
        StabilityLabel::Stable => 0.3,
        StabilityLabel::Moderate => 0.1,
        StabilityLabel::Unstable => -0.2,
    };
    let variability_adjustment = match variability {
        VariabilityTier::Low => 0.2,
        VariabilityTier::Moderate => 0.1,
        VariabilityTier::High => -0.1,
    };

    SubModelResult::Evaluated(StabilityAssessment {
        score: clamp_unit(BASE_SCORE + stability_adjustment + variability_adjustment),
        label,
        variability,
        variability_coefficient: cv,
    })
}

/// Perfusion tier from the perfusion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerfusionTier {
    Poor,
    Fair,
    Good,
    Excellent,
    /// The oximeter did not report a perfusion index.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyTier {
    Poor,
    Good,
    Excellent,
}

/// Blood-oxygen-perfusion sub-model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerfusionAssessment {
    pub score: f64,
    pub label: PerfusionTier,
    /// Oxygen-carrying efficiency, saturation as a fraction of 1.
    pub efficiency: f64,
    pub efficiency_tier: EfficiencyTier,
}

impl Scored for PerfusionAssessment {
    fn score(&self) -> f64 {
        self.score
    }
}

/// Evaluates blood-oxygen perfusion.
///
/// Perfusion-index tiers poor/fair/good/excellent adjust by
/// −0.2/+0.1/+0.2/+0.3; a missing index skips the adjustment and reports the
/// tier as unknown. Efficiency (percent/100) ≥0.95 excellent (+0.2), ≥0.90
/// good (+0.1), else poor (−0.1).
pub fn evaluate_blood_oxygen_perfusion(
    sample: Option<&OximetrySample>,
) -> SubModelResult<PerfusionAssessment> {
    let Some(sample) = sample else {
        return SubModelResult::insufficient();
    };

    let (label, perfusion_adjustment) = match sample.perfusion_index {
        Some(pi) if pi < 0.5 => (PerfusionTier::Poor, -0.2),
        Some(pi) if pi < 1.0 => (PerfusionTier::Fair, 0.1),
        Some(pi) if pi < 2.0 => (PerfusionTier::Good, 0.2),
        Some(_) => (PerfusionTier::Excellent, 0.3),
        None => (PerfusionTier::Unknown, 0.0),
    };

    let efficiency = sample.percent / 100.0;
    let (efficiency_tier, efficiency_adjustment) = if efficiency >= 0.95 {
        (EfficiencyTier::Excellent, 0.2)
    } else if efficiency >= 0.90 {
        (EfficiencyTier::Good, 0.1)
    } else {
        (EfficiencyTier::Poor, -0.1)
    };

    SubModelResult::Evaluated(PerfusionAssessment {
        score: clamp_unit(BASE_SCORE + perfusion_adjustment + efficiency_adjustment),
        label,
        efficiency,
        efficiency_tier,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynergyLabel {
    Good,
    Moderate,
    Poor,
}

/// Advisory concordance finding between temperature and pulse.
///
/// Fever with tachycardia, or hypothermia with bradycardia, is
/// physiologically concordant. Advisory only; never feeds a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correlation {
    PositiveCorrelation,
    NoSignificantCorrelation,
}

/// Temperature-pulse-synergy sub-model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynergyAssessment {
    pub score: f64,
    pub label: SynergyLabel,
    /// Mean of the two risk-tier numbers.
    pub synergy_risk: f64,
    pub temperature_score: f64,
    pub pulse_score: f64,
    pub correlation: Correlation,
}

impl Scored for SynergyAssessment {
    fn score(&self) -> f64 {
        self.score
    }
}

fn temperature_field_score(category: TemperatureCategory) -> f64 {
    match category {
        TemperatureCategory::Normal => 1.0,
        TemperatureCategory::LowNormal => 0.6,
        TemperatureCategory::Fever => 0.4,
        TemperatureCategory::HighFever => 0.2,
        TemperatureCategory::Hypothermia => 0.2,
    }
}

fn pulse_field_score(category: PulseCategory) -> f64 {
    match category {
        PulseCategory::Normal => 1.0,
        PulseCategory::Tachycardia => 0.5,
        PulseCategory::Bradycardia => 0.4,
        PulseCategory::SevereTachycardia => 0.2,
    }
}

/// Evaluates temperature-pulse synergy.
///
/// Requires both classifications; otherwise returns the insufficient-data
/// sentinel with score 0. The final score is
/// `0.5 + 0.3×(tempScore−0.5) + 0.3×(pulseScore−0.5)` plus +0.2/+0.1/−0.1 by
/// synergy label (good <0.3, moderate <0.6, else poor over the mean risk
/// number), clamped to [0,1].
pub fn evaluate_temperature_pulse_synergy(
    temperature: &TemperatureClassification,
    pulse: &PulseClassification,
) -> SubModelResult<SynergyAssessment> {
    let (VitalClassification::Classified {
        category: temp_category,
        risk_level: temp_risk,
        ..
    }, VitalClassification::Classified {
        category: pulse_category,
        risk_level: pulse_risk,
        ..
    }) = (temperature, pulse)
    else {
        return SubModelResult::insufficient();
    };

    let temperature_score = temperature_field_score(*temp_category);
    let pulse_score = pulse_field_score(*pulse_category);

    let synergy_risk = (temp_risk.as_number() + pulse_risk.as_number()) / 2.0;
    let label = if synergy_risk < 0.3 {
        SynergyLabel::Good
    } else if synergy_risk < 0.6 {
        SynergyLabel::Moderate
    } else {
        SynergyLabel::Poor
    };
    let synergy_adjustment = match label {
        SynergyLabel::Good => 0.2,
        SynergyLabel::Moderate => 0.1,
        SynergyLabel::Poor => -0.1,
    };

    let score = clamp_unit(
        BASE_SCORE
            + 0.3 * (temperature_score - BASE_SCORE)
            + 0.3 * (pulse_score - BASE_SCORE)
            + synergy_adjustment,
    );

    SubModelResult::Evaluated(SynergyAssessment {
        score,
        label,
        synergy_risk,
        temperature_score,
        pulse_score,
        correlation: correlation_check(*temp_category, *pulse_category),
    })
}

fn correlation_check(temperature: TemperatureCategory, pulse: PulseCategory) -> Correlation {
    let febrile = matches!(
        temperature,
        TemperatureCategory::Fever | TemperatureCategory::HighFever
    );
    let fast = matches!(
        pulse,
        PulseCategory::Tachycardia | PulseCategory::SevereTachycardia
    );
    let cold = temperature == TemperatureCategory::Hypothermia;
    let slow = pulse == PulseCategory::Bradycardia;

    if (febrile && fast) || (cold && slow) {
        Correlation::PositiveCorrelation
    } else {
        Correlation::NoSignificantCorrelation
    }
}
