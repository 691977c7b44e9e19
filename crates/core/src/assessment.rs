//! Assessment orchestrator.
//!
//! Sequences classification, sub-model evaluation, derivation, composite
//! scoring, and stratification into one immutable report per call. The whole
//! pass is a pure function of the reading and the configuration; the service
//! wrapper only attaches a report id and timestamp. Nothing here holds state
//! across calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::{classify_reading, BasicVitalSigns};
use crate::composite::{composite_score, CompositeScore};
use crate::config::CoreConfig;
use crate::insights::{derive_insights, DerivedInsight};
use crate::reading::{RawDeviceRecord, VitalReading};
use crate::stratify::{stratify, RiskStratification};
use crate::submodel::{
    evaluate_blood_oxygen_perfusion, evaluate_blood_pressure_stability,
    evaluate_temperature_pulse_synergy, PerfusionAssessment, StabilityAssessment, SubModelResult,
    SynergyAssessment,
};
use crate::AssessmentResult;

/// The three sub-model outcomes for one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubModelAssessments {
    pub blood_pressure_stability: SubModelResult<StabilityAssessment>,
    pub blood_oxygen_perfusion: SubModelResult<PerfusionAssessment>,
    pub temperature_pulse_synergy: SubModelResult<SynergyAssessment>,
}

/// The deterministic body of an assessment report.
///
/// Identical readings produce identical bodies; only the wrapping
/// [`HealthAssessment`] carries the per-call id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub composite_score: CompositeScore,
    pub risk_stratification: RiskStratification,
    pub basic_vital_signs: BasicVitalSigns,
    pub sub_model_assessments: SubModelAssessments,
    pub derived_insights: Vec<DerivedInsight>,
    pub personalized_recommendations: Vec<String>,
    pub data_limitations: Vec<String>,
}

/// A finished assessment with identity and provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: AssessmentReport,
}

fn data_limitations(reading: &VitalReading) -> Vec<String> {
    let mut notes = vec![
        "Assessment covers blood pressure, oxygen saturation, temperature, and \
         pulse only; glucose, lipid, exercise, and diet data are not captured and \
         are not reflected in the score"
            .to_owned(),
        "Scores are derived from single point-in-time readings, not continuous \
         monitoring"
            .to_owned(),
    ];
    if reading.blood_pressure.is_none() {
        notes.push("No blood pressure reading supplied; the stability sub-model was skipped".to_owned());
    }
    if reading.oximetry.is_none() {
        notes.push("No oximetry reading supplied; the perfusion sub-model was skipped".to_owned());
    }
    if reading.temperature.is_none() || reading.pulse_with_source().is_none() {
        notes.push(
            "Temperature and pulse were not both available; the synergy sub-model \
             was skipped"
                .to_owned(),
        );
    }
    notes
}

/// Runs one full scoring pass. Pure and deterministic.
///
/// The reading must already be validated; this function never fails on
/// missing substructures, which flow through as explicit no-data results.
pub fn assess_reading(reading: &VitalReading, config: &CoreConfig) -> AssessmentReport {
    let basic_vital_signs = classify_reading(reading, config.thresholds());

    let blood_pressure_stability =
        evaluate_blood_pressure_stability(reading.blood_pressure.as_ref());
    let blood_oxygen_perfusion = evaluate_blood_oxygen_perfusion(reading.oximetry.as_ref());
    let temperature_pulse_synergy = evaluate_temperature_pulse_synergy(
        &basic_vital_signs.temperature,
        &basic_vital_signs.pulse,
    );

    let composite = composite_score(
        &blood_pressure_stability,
        &blood_oxygen_perfusion,
        &temperature_pulse_synergy,
        config.weights(),
    );
    let risk_stratification = stratify(&composite, reading);
    let derived_insights = derive_insights(reading);

    let personalized_recommendations = risk_stratification.recommendations.clone();

    AssessmentReport {
        data_limitations: data_limitations(reading),
        composite_score: composite,
        risk_stratification,
        basic_vital_signs,
        sub_model_assessments: SubModelAssessments {
            blood_pressure_stability,
            blood_oxygen_perfusion,
            temperature_pulse_synergy,
        },
        derived_insights,
        personalized_recommendations,
    }
}

/// Stateless facade over the scoring engine.
///
/// Holds only the startup-resolved configuration; safe to share and to call
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct AssessmentService {
    config: CoreConfig,
}

impl AssessmentService {
    pub fn new(config: CoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Assesses a canonical reading.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Structural` if the reading is malformed; in
    /// that case no partial report is produced.
    pub fn assess(&self, reading: &VitalReading) -> AssessmentResult<HealthAssessment> {
        reading.validate()?;
        let report = assess_reading(reading, &self.config);
        tracing::debug!(
            score = report.composite_score.score,
            grade = %report.composite_score.grade,
            category = %report.risk_stratification.category,
            "assessment complete"
        );
        Ok(HealthAssessment {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            report,
        })
    }

    /// Normalises a raw device record, then assesses it.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Structural` if normalisation fails or the
    /// normalised reading is malformed.
    pub fn assess_raw(&self, raw: &RawDeviceRecord) -> AssessmentResult<HealthAssessment> {
        let reading = raw.normalise()?;
        self.assess(&reading)
    }
}
