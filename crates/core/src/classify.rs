//! Vital-sign classifiers.
//!
//! Four pure functions, one per vital sign, mapping a reading substructure
//! plus its threshold table to a category and risk tier. A missing
//! substructure yields an explicit no-data result; callers must exclude it
//! from scoring rather than treat it as low risk.
//!
//! Boundary convention: the fever comparison is strict `>` against the site's
//! upper bound, and the same strictness applies to every other tier here.

use serde::{Deserialize, Serialize};
use vhd_types::RiskLevel;

use crate::reading::{
    BloodPressureSample, OximetrySample, PulseSource, TemperatureSample, VitalReading,
};
use crate::thresholds::{
    BloodPressureThresholds, OxygenThresholds, PulseThresholds, TemperatureThresholds,
    ThresholdTable,
};

/// Classification outcome for one vital sign.
///
/// `C` is the category enum, `V` the raw values that fed the decision.
/// Serialises with a `status` tag so the no-data sentinel is explicit on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VitalClassification<C, V> {
    /// The substructure was absent from the reading.
    NoData,
    /// The vital sign was classified.
    Classified {
        category: C,
        risk_level: RiskLevel,
        #[serde(flatten)]
        values: V,
    },
}

impl<C, V> VitalClassification<C, V> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, VitalClassification::NoData)
    }

    pub fn category(&self) -> Option<&C> {
        match self {
            VitalClassification::NoData => None,
            VitalClassification::Classified { category, .. } => Some(category),
        }
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        match self {
            VitalClassification::NoData => None,
            VitalClassification::Classified { risk_level, .. } => Some(*risk_level),
        }
    }
}

/// Blood-pressure stage, ascending in severity (the derived `Ord` encodes
/// the "more severe of the two values" rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureCategory {
    Normal,
    HighNormal,
    Stage1Hypertension,
    Stage2Hypertension,
    Stage3Hypertension,
}

impl BloodPressureCategory {
    pub fn risk_level(self) -> RiskLevel {
        match self {
            BloodPressureCategory::Normal => RiskLevel::Low,
            BloodPressureCategory::HighNormal => RiskLevel::LowModerate,
            BloodPressureCategory::Stage1Hypertension => RiskLevel::Moderate,
            BloodPressureCategory::Stage2Hypertension => RiskLevel::High,
            BloodPressureCategory::Stage3Hypertension => RiskLevel::VeryHigh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OxygenCategory {
    Normal,
    MildHypoxemia,
    SevereHypoxemia,
}

impl OxygenCategory {
    pub fn risk_level(self) -> RiskLevel {
        match self {
            OxygenCategory::Normal => RiskLevel::Low,
            OxygenCategory::MildHypoxemia => RiskLevel::Moderate,
            OxygenCategory::SevereHypoxemia => RiskLevel::VeryHigh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureCategory {
    Hypothermia,
    LowNormal,
    Normal,
    Fever,
    HighFever,
}

impl TemperatureCategory {
    pub fn risk_level(self) -> RiskLevel {
        match self {
            TemperatureCategory::Hypothermia => RiskLevel::High,
            TemperatureCategory::LowNormal => RiskLevel::LowModerate,
            TemperatureCategory::Normal => RiskLevel::Low,
            TemperatureCategory::Fever => RiskLevel::Moderate,
            TemperatureCategory::HighFever => RiskLevel::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseCategory {
    Bradycardia,
    Normal,
    Tachycardia,
    SevereTachycardia,
}

impl PulseCategory {
    pub fn risk_level(self) -> RiskLevel {
        match self {
            PulseCategory::Bradycardia => RiskLevel::Moderate,
            PulseCategory::Normal => RiskLevel::Low,
            PulseCategory::Tachycardia => RiskLevel::Moderate,
            PulseCategory::SevereTachycardia => RiskLevel::High,
        }
    }
}

/// Raw values carried alongside a blood-pressure classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureValues {
    pub systolic: f64,
    pub diastolic: f64,
}

/// Raw values carried alongside an oxygen classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OxygenValues {
    pub percent: f64,
    pub perfusion_index: Option<f64>,
}

/// Raw values carried alongside a temperature classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureValues {
    pub value: f64,
    pub site: vhd_types::TemperatureSite,
}

/// Raw values carried alongside a pulse classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseValues {
    pub bpm: f64,
    pub source: PulseSource,
}

pub type BloodPressureClassification =
    VitalClassification<BloodPressureCategory, BloodPressureValues>;
pub type OxygenClassification = VitalClassification<OxygenCategory, OxygenValues>;
pub type TemperatureClassification = VitalClassification<TemperatureCategory, TemperatureValues>;
pub type PulseClassification = VitalClassification<PulseCategory, PulseValues>;

/// Classifies a blood-pressure sample.
///
/// Systolic and diastolic are staged independently against the table and the
/// more severe stage wins: either value crossing a bound elevates the
/// category (an "or" rule, not "and").
pub fn classify_blood_pressure(
    sample: Option<&BloodPressureSample>,
    thresholds: &BloodPressureThresholds,
) -> BloodPressureClassification {
    let Some(sample) = sample else {
        return VitalClassification::NoData;
    };

    let systolic_stage = stage_for(sample.systolic, thresholds, |b| b.systolic_below);
    let diastolic_stage = stage_for(sample.diastolic, thresholds, |b| b.diastolic_below);
    let category = systolic_stage.max(diastolic_stage);

    VitalClassification::Classified {
        category,
        risk_level: category.risk_level(),
        values: BloodPressureValues {
            systolic: sample.systolic,
            diastolic: sample.diastolic,
        },
    }
}

fn stage_for(
    value: f64,
    thresholds: &BloodPressureThresholds,
    bound: impl Fn(&crate::thresholds::BpStageBounds) -> f64,
) -> BloodPressureCategory {
    if value < bound(&thresholds.normal) {
        BloodPressureCategory::Normal
    } else if value < bound(&thresholds.high_normal) {
        BloodPressureCategory::HighNormal
    } else if value < bound(&thresholds.stage1) {
        BloodPressureCategory::Stage1Hypertension
    } else if value < bound(&thresholds.stage2) {
        BloodPressureCategory::Stage2Hypertension
    } else {
        BloodPressureCategory::Stage3Hypertension
    }
}

/// Classifies an oxygen-saturation sample.
pub fn classify_blood_oxygen(
    sample: Option<&OximetrySample>,
    thresholds: &OxygenThresholds,
) -> OxygenClassification {
    let Some(sample) = sample else {
        return VitalClassification::NoData;
    };

    let category = if sample.percent < thresholds.severe_below {
        OxygenCategory::SevereHypoxemia
    } else if sample.percent < thresholds.mild_below {
        OxygenCategory::MildHypoxemia
    } else {
        OxygenCategory::Normal
    };

    VitalClassification::Classified {
        category,
        risk_level: category.risk_level(),
        values: OxygenValues {
            percent: sample.percent,
            perfusion_index: sample.perfusion_index,
        },
    }
}

/// Classifies a temperature sample against its site's normal range.
///
/// Beyond the range by more than the severe margin is high fever or
/// hypothermia; beyond the range at all is fever or low-normal.
pub fn classify_temperature(
    sample: Option<&TemperatureSample>,
    thresholds: &TemperatureThresholds,
) -> TemperatureClassification {
    let Some(sample) = sample else {
        return VitalClassification::NoData;
    };

    let range = thresholds.range(sample.site);
    let category = if sample.value > range.max + thresholds.severe_margin {
        TemperatureCategory::HighFever
    } else if sample.value > range.max {
        TemperatureCategory::Fever
    } else if sample.value < range.min - thresholds.severe_margin {
        TemperatureCategory::Hypothermia
    } else if sample.value < range.min {
        TemperatureCategory::LowNormal
    } else {
        TemperatureCategory::Normal
    };

    VitalClassification::Classified {
        category,
        risk_level: category.risk_level(),
        values: TemperatureValues {
            value: sample.value,
            site: sample.site,
        },
    }
}

/// Classifies the resolved pulse (cuff first, oximeter fallback).
pub fn classify_pulse(
    pulse: Option<(f64, PulseSource)>,
    thresholds: &PulseThresholds,
) -> PulseClassification {
    let Some((bpm, source)) = pulse else {
        return VitalClassification::NoData;
    };

    let category = if bpm < thresholds.bradycardia_below {
        PulseCategory::Bradycardia
    } else if bpm > thresholds.severe_tachycardia_above {
        PulseCategory::SevereTachycardia
    } else if bpm > thresholds.tachycardia_above {
        PulseCategory::Tachycardia
    } else {
        PulseCategory::Normal
    };

    VitalClassification::Classified {
        category,
        risk_level: category.risk_level(),
        values: PulseValues { bpm, source },
    }
}

/// Runs all four classifiers over one reading.
pub fn classify_reading(reading: &VitalReading, thresholds: &ThresholdTable) -> BasicVitalSigns {
    BasicVitalSigns {
        blood_pressure: classify_blood_pressure(
            reading.blood_pressure.as_ref(),
            &thresholds.blood_pressure,
        ),
        blood_oxygen: classify_blood_oxygen(reading.oximetry.as_ref(), &thresholds.oxygen),
        temperature: classify_temperature(reading.temperature.as_ref(), &thresholds.temperature),
        pulse: classify_pulse(reading.pulse_with_source(), &thresholds.pulse),
    }
}

/// The four per-vital classifications for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicVitalSigns {
    pub blood_pressure: BloodPressureClassification,
    pub blood_oxygen: OxygenClassification,
    pub temperature: TemperatureClassification,
    pub pulse: PulseClassification,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vhd_types::TemperatureSite;

    fn bp(systolic: f64, diastolic: f64) -> BloodPressureSample {
        BloodPressureSample {
            systolic,
            diastolic,
            pulse: None,
        }
    }

    #[test]
    fn test_bp_absent_is_no_data() {
        let cls = classify_blood_pressure(None, &BloodPressureThresholds::default());
        assert!(cls.is_no_data());
        assert_eq!(cls.risk_level(), None);
    }

    #[test]
    fn test_bp_stage3_scenario() {
        let cls = classify_blood_pressure(
            Some(&bp(185.0, 115.0)),
            &BloodPressureThresholds::default(),
        );
        assert_eq!(
            cls.category(),
            Some(&BloodPressureCategory::Stage3Hypertension)
        );
        assert_eq!(cls.risk_level(), Some(RiskLevel::VeryHigh));
    }

    #[test]
    fn test_bp_takes_more_severe_of_the_two_values() {
        // Systolic alone is normal; the diastolic value elevates the stage.
        let cls = classify_blood_pressure(
            Some(&bp(125.0, 102.0)),
            &BloodPressureThresholds::default(),
        );
        assert_eq!(
            cls.category(),
            Some(&BloodPressureCategory::Stage2Hypertension)
        );
    }

    #[test]
    fn test_bp_risk_is_monotonic_in_systolic() {
        let thresholds = BloodPressureThresholds::default();
        let mut last = RiskLevel::Low;
        for systolic in [120.0, 130.0, 140.0, 160.0, 180.0, 200.0] {
            let cls = classify_blood_pressure(Some(&bp(systolic, 70.0)), &thresholds);
            let risk = cls.risk_level().unwrap();
            assert!(risk >= last, "risk regressed at systolic {systolic}");
            last = risk;
        }
        assert_eq!(last, RiskLevel::VeryHigh);
    }

    #[test]
    fn test_oxygen_cutoffs() {
        let thresholds = OxygenThresholds::default();
        let sample = |percent| OximetrySample {
            percent,
            perfusion_index: None,
            pulse_rate: None,
        };

        let cls = classify_blood_oxygen(Some(&sample(88.0)), &thresholds);
        assert_eq!(cls.category(), Some(&OxygenCategory::SevereHypoxemia));
        assert_eq!(cls.risk_level(), Some(RiskLevel::VeryHigh));

        let cls = classify_blood_oxygen(Some(&sample(93.0)), &thresholds);
        assert_eq!(cls.category(), Some(&OxygenCategory::MildHypoxemia));
        assert_eq!(cls.risk_level(), Some(RiskLevel::Moderate));

        let cls = classify_blood_oxygen(Some(&sample(97.0)), &thresholds);
        assert_eq!(cls.category(), Some(&OxygenCategory::Normal));
        assert_eq!(cls.risk_level(), Some(RiskLevel::Low));
    }

    #[test]
    fn test_temperature_fever_band_is_strict() {
        let thresholds = TemperatureThresholds::default();
        let axillary = |value| TemperatureSample {
            value,
            site: TemperatureSite::Axillary,
        };

        // 38.0 exceeds the axillary max (37.2) but not max + 0.5: fever.
        let cls = classify_temperature(Some(&axillary(38.0)), &thresholds);
        assert_eq!(cls.category(), Some(&TemperatureCategory::Fever));
        assert_eq!(cls.risk_level(), Some(RiskLevel::Moderate));

        // Exactly at the bound stays in the lower tier (strict `>`).
        let cls = classify_temperature(Some(&axillary(37.2)), &thresholds);
        assert_eq!(cls.category(), Some(&TemperatureCategory::Normal));
        let cls = classify_temperature(Some(&axillary(37.7)), &thresholds);
        assert_eq!(cls.category(), Some(&TemperatureCategory::Fever));

        let cls = classify_temperature(Some(&axillary(37.8)), &thresholds);
        assert_eq!(cls.category(), Some(&TemperatureCategory::HighFever));
        assert_eq!(cls.risk_level(), Some(RiskLevel::High));
    }

    #[test]
    fn test_temperature_low_tiers() {
        let thresholds = TemperatureThresholds::default();
        let axillary = |value| TemperatureSample {
            value,
            site: TemperatureSite::Axillary,
        };

        let cls = classify_temperature(Some(&axillary(35.8)), &thresholds);
        assert_eq!(cls.category(), Some(&TemperatureCategory::LowNormal));
        assert_eq!(cls.risk_level(), Some(RiskLevel::LowModerate));

        let cls = classify_temperature(Some(&axillary(35.2)), &thresholds);
        assert_eq!(cls.category(), Some(&TemperatureCategory::Hypothermia));
        assert_eq!(cls.risk_level(), Some(RiskLevel::High));
    }

    #[test]
    fn test_temperature_uses_site_range() {
        let thresholds = TemperatureThresholds::default();
        // 37.5 is a fever under the arm but normal in the ear (max 38.0).
        let cls = classify_temperature(
            Some(&TemperatureSample {
                value: 37.5,
                site: TemperatureSite::Ear,
            }),
            &thresholds,
        );
        assert_eq!(cls.category(), Some(&TemperatureCategory::Normal));
    }

    #[test]
    fn test_pulse_tiers() {
        let thresholds = PulseThresholds::default();

        let cls = classify_pulse(Some((45.0, PulseSource::Cuff)), &thresholds);
        assert_eq!(cls.category(), Some(&PulseCategory::Bradycardia));
        assert_eq!(cls.risk_level(), Some(RiskLevel::Moderate));

        let cls = classify_pulse(Some((72.0, PulseSource::Cuff)), &thresholds);
        assert_eq!(cls.category(), Some(&PulseCategory::Normal));

        let cls = classify_pulse(Some((110.0, PulseSource::Oximeter)), &thresholds);
        assert_eq!(cls.category(), Some(&PulseCategory::Tachycardia));

        let cls = classify_pulse(Some((130.0, PulseSource::Cuff)), &thresholds);
        assert_eq!(cls.category(), Some(&PulseCategory::SevereTachycardia));
        assert_eq!(cls.risk_level(), Some(RiskLevel::High));
    }

    #[test]
    fn test_no_data_serialises_with_status_tag() {
        let cls = BloodPressureClassification::NoData;
        assert_eq!(
            serde_json::to_string(&cls).unwrap(),
            r#"{"status":"no_data"}"#
        );
    }
}
