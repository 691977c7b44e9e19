//! Derivation engine: cross-signal insight rules.
//!
//! Independent pairwise rules over the raw reading values. Every rule is
//! evaluated (they are not mutually exclusive) and each triggered rule emits
//! one advisory insight with fixed moderate confidence and static
//! recommendation/reference text. Insights never feed the composite score.

use serde::{Deserialize, Serialize};

use crate::reading::VitalReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    CirculationLoad,
    WeakCirculation,
    RespiratoryPerfusion,
    Metabolic,
}

/// Confidence attached to derived insights.
///
/// Pairwise rules over single-point readings only ever justify moderate
/// confidence, so this is currently a one-variant enum kept for wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightConfidence {
    Moderate,
}

/// One advisory insight derived from a pair of vital signs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedInsight {
    pub kind: InsightKind,
    pub summary: String,
    pub confidence: InsightConfidence,
    pub recommendation: String,
    pub reference: String,
}

impl DerivedInsight {
    fn new(kind: InsightKind, summary: &str, recommendation: &str, reference: &str) -> Self {
        Self {
            kind,
            summary: summary.to_owned(),
            confidence: InsightConfidence::Moderate,
            recommendation: recommendation.to_owned(),
            reference: reference.to_owned(),
        }
    }
}

/// Evaluates every derivation rule against one reading.
///
/// Rules that lack an input simply do not trigger; the list may be empty.
pub fn derive_insights(reading: &VitalReading) -> Vec<DerivedInsight> {
    let mut insights = Vec::new();

    let systolic = reading.blood_pressure.map(|bp| bp.systolic);
    let pulse = reading.pulse_with_source().map(|(bpm, _)| bpm);
    let saturation = reading.oximetry.map(|ox| ox.percent);
    let perfusion_index = reading.oximetry.and_then(|ox| ox.perfusion_index);
    let temperature = reading.temperature.map(|t| t.value);

    if let (Some(systolic), Some(pulse)) = (systolic, pulse) {
        if systolic >= 140.0 && pulse > 100.0 {
            insights.push(DerivedInsight::new(
                InsightKind::CirculationLoad,
                "Elevated blood pressure together with a fast pulse suggests an \
                 increased circulatory load",
                "Rest, avoid stimulants, and re-measure after 30 minutes; seek advice \
                 if the pattern persists",
                "Combined blood-pressure and heart-rate interpretation guidance",
            ));
        }
        if systolic < 100.0 && pulse < 60.0 {
            insights.push(DerivedInsight::new(
                InsightKind::WeakCirculation,
                "Low blood pressure together with a slow pulse suggests weak \
                 circulation",
                "Hydrate, rise slowly from sitting, and monitor for dizziness",
                "Hypotension with bradycardia interpretation guidance",
            ));
        }
    }

    if let (Some(saturation), Some(pi)) = (saturation, perfusion_index) {
        if saturation < 95.0 && pi < 1.0 {
            insights.push(DerivedInsight::new(
                InsightKind::RespiratoryPerfusion,
                "Reduced oxygen saturation together with a low perfusion index \
                 suggests impaired respiratory gas exchange or peripheral perfusion",
                "Re-measure with a warm, still hand; seek advice if saturation stays \
                 below 95%",
                "Pulse-oximetry perfusion-index interpretation guidance",
            ));
        }
    }

    if let (Some(temperature), Some(pulse)) = (temperature, pulse) {
        if temperature > 37.5 && pulse > 100.0 {
            insights.push(DerivedInsight::new(
                InsightKind::Metabolic,
                "Raised temperature together with a fast pulse suggests an elevated \
                 metabolic state, commonly febrile",
                "Rest and fluids; monitor temperature and pulse every few hours",
                "Fever and heart-rate co-elevation interpretation guidance",
            ));
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{BloodPressureSample, OximetrySample, TemperatureSample};
    use vhd_types::TemperatureSite;

    fn reading(
        bp: Option<(f64, f64, Option<f64>)>,
        ox: Option<(f64, Option<f64>)>,
        temp: Option<f64>,
    ) -> VitalReading {
        VitalReading {
            blood_pressure: bp.map(|(systolic, diastolic, pulse)| BloodPressureSample {
                systolic,
                diastolic,
                pulse,
            }),
            oximetry: ox.map(|(percent, perfusion_index)| OximetrySample {
                percent,
                perfusion_index,
                pulse_rate: None,
            }),
            temperature: temp.map(|value| TemperatureSample {
                value,
                site: TemperatureSite::Axillary,
            }),
        }
    }

    #[test]
    fn test_no_insights_for_normal_reading() {
        let insights = derive_insights(&reading(
            Some((120.0, 80.0, Some(72.0))),
            Some((98.0, Some(2.0))),
            Some(36.8),
        ));
        assert!(insights.is_empty());
    }

    #[test]
    fn test_circulation_load_rule() {
        let insights = derive_insights(&reading(Some((150.0, 95.0, Some(105.0))), None, None));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::CirculationLoad);
        assert_eq!(insights[0].confidence, InsightConfidence::Moderate);
    }

    #[test]
    fn test_weak_circulation_rule() {
        let insights = derive_insights(&reading(Some((95.0, 60.0, Some(55.0))), None, None));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::WeakCirculation);
    }

    #[test]
    fn test_respiratory_perfusion_rule_needs_both_fields() {
        let insights = derive_insights(&reading(None, Some((93.0, Some(0.8))), None));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::RespiratoryPerfusion);

        // Missing perfusion index: the rule has no input and stays silent.
        let insights = derive_insights(&reading(None, Some((93.0, None)), None));
        assert!(insights.is_empty());
    }

    #[test]
    fn test_metabolic_rule_uses_oximeter_pulse_fallback() {
        let mut r = reading(None, Some((98.0, None)), Some(38.2));
        r.oximetry = r.oximetry.map(|mut ox| {
            ox.pulse_rate = Some(110.0);
            ox
        });
        let insights = derive_insights(&r);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Metabolic);
    }

    #[test]
    fn test_rules_are_independent_and_can_stack() {
        // Elevated BP + fast pulse + fever triggers both the circulation-load
        // and metabolic rules.
        let insights = derive_insights(&reading(Some((150.0, 95.0, Some(110.0))), None, Some(38.5)));
        let kinds: Vec<_> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![InsightKind::CirculationLoad, InsightKind::Metabolic]
        );
    }
}
