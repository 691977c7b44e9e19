//! Canonical vital-sign readings and the device-record normalisation boundary.
//!
//! Device exports name the same measurements inconsistently (`bp` vs
//! `blood_pressure`, `pr` vs `pulse_rate`, English vs Chinese site labels).
//! All of that variance is resolved here, once, before any classifier runs:
//! [`RawDeviceRecord::normalise`] applies a documented field-precedence table
//! and produces the canonical [`VitalReading`] the rest of the engine consumes.
//!
//! # Field precedence
//!
//! | Canonical field | Taken from, in order |
//! |---|---|
//! | blood pressure block | `bloodPressure`, `bp` |
//! | systolic | `systolic`, `sys` |
//! | diastolic | `diastolic`, `dia` |
//! | cuff pulse | `pulse`, `heartRate` |
//! | oximetry block | `spO2`, `bloodOxygen` |
//! | oxygen saturation | `percent`, `spo2` |
//! | perfusion index | `pi`, `perfusionIndex` |
//! | oximeter pulse rate | `pr`, `pulseRate` |
//! | temperature block | `temperature`, `bodyTemperature` |
//! | temperature value | `value`, `temp` |
//! | site label | `location`, `site` (unknown labels default to axillary) |
//!
//! Pulse for classification prefers the cuff reading and falls back to the
//! oximeter pulse rate; see [`VitalReading::pulse_with_source`].

use serde::{Deserialize, Serialize};
use vhd_types::TemperatureSite;

use crate::{AssessmentError, AssessmentResult};

/// One blood-pressure cuff measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureSample {
    /// Systolic pressure in mmHg.
    pub systolic: f64,
    /// Diastolic pressure in mmHg.
    pub diastolic: f64,
    /// Pulse reported by the cuff, in beats per minute.
    pub pulse: Option<f64>,
}

/// One pulse-oximeter measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OximetrySample {
    /// Oxygen saturation as a percentage (0–100).
    pub percent: f64,
    /// Perfusion index, if the device reports it.
    pub perfusion_index: Option<f64>,
    /// Pulse rate reported by the oximeter, in beats per minute.
    pub pulse_rate: Option<f64>,
}

/// One body-temperature measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSample {
    /// Temperature in degrees Celsius.
    pub value: f64,
    /// Where the measurement was taken.
    pub site: TemperatureSite,
}

/// Which device produced the pulse value used for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseSource {
    Cuff,
    Oximeter,
}

/// Canonical vital-sign reading consumed by the scoring engine.
///
/// Every substructure is optional. A missing substructure is meaningful: it
/// propagates through classification as an explicit no-data result and is
/// excluded from the composite score, never treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VitalReading {
    pub blood_pressure: Option<BloodPressureSample>,
    pub oximetry: Option<OximetrySample>,
    pub temperature: Option<TemperatureSample>,
}

impl VitalReading {
    /// Resolves the pulse value for classification.
    ///
    /// The cuff reading takes precedence; the oximeter pulse rate is the
    /// fallback. Returns `None` when neither device reported a pulse.
    pub fn pulse_with_source(&self) -> Option<(f64, PulseSource)> {
        if let Some(pulse) = self.blood_pressure.and_then(|bp| bp.pulse) {
            return Some((pulse, PulseSource::Cuff));
        }
        self.oximetry
            .and_then(|ox| ox.pulse_rate)
            .map(|pr| (pr, PulseSource::Oximeter))
    }

    /// Checks the reading for structural problems.
    ///
    /// A present substructure must carry finite, physiologically positive
    /// numbers. Violations are fatal for the whole assessment: the
    /// orchestrator surfaces one descriptive error and produces no partial
    /// report.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Structural` naming the offending field.
    pub fn validate(&self) -> AssessmentResult<()> {
        fn check(field: &str, value: f64) -> AssessmentResult<()> {
            if !value.is_finite() || value <= 0.0 {
                return Err(AssessmentError::Structural(format!(
                    "{field} must be a finite positive number, got {value}"
                )));
            }
            Ok(())
        }

        if let Some(bp) = &self.blood_pressure {
            check("blood_pressure.systolic", bp.systolic)?;
            check("blood_pressure.diastolic", bp.diastolic)?;
            if let Some(pulse) = bp.pulse {
                check("blood_pressure.pulse", pulse)?;
            }
        }
        if let Some(ox) = &self.oximetry {
            check("oximetry.percent", ox.percent)?;
            if ox.percent > 100.0 {
                return Err(AssessmentError::Structural(format!(
                    "oximetry.percent cannot exceed 100, got {}",
                    ox.percent
                )));
            }
            if let Some(pi) = ox.perfusion_index {
                check("oximetry.perfusion_index", pi)?;
            }
            if let Some(pr) = ox.pulse_rate {
                check("oximetry.pulse_rate", pr)?;
            }
        }
        if let Some(temp) = &self.temperature {
            check("temperature.value", temp.value)?;
        }
        Ok(())
    }
}

/// Raw device-record wire format, as exported by the dashboard frontend.
///
/// Field names mirror the device exports, aliases included. This type exists
/// only to be normalised; nothing downstream of [`RawDeviceRecord::normalise`]
/// sees it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDeviceRecord {
    #[serde(default, alias = "bloodPressure", alias = "bp")]
    pub blood_pressure: Option<RawBloodPressure>,
    #[serde(default, alias = "spO2", alias = "bloodOxygen", alias = "blood_oxygen")]
    pub oximetry: Option<RawOximetry>,
    #[serde(default, alias = "bodyTemperature", alias = "body_temperature")]
    pub temperature: Option<RawTemperature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBloodPressure {
    #[serde(default)]
    pub systolic: Option<f64>,
    #[serde(default)]
    pub sys: Option<f64>,
    #[serde(default)]
    pub diastolic: Option<f64>,
    #[serde(default)]
    pub dia: Option<f64>,
    #[serde(default)]
    pub pulse: Option<f64>,
    #[serde(default, alias = "heartRate")]
    pub heart_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOximetry {
    #[serde(default)]
    pub percent: Option<f64>,
    #[serde(default)]
    pub spo2: Option<f64>,
    #[serde(default)]
    pub pi: Option<f64>,
    #[serde(default, alias = "perfusionIndex")]
    pub perfusion_index: Option<f64>,
    #[serde(default)]
    pub pr: Option<f64>,
    #[serde(default, alias = "pulseRate")]
    pub pulse_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTemperature {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
}

impl RawDeviceRecord {
    /// Normalises the raw record into a canonical [`VitalReading`].
    ///
    /// Applies the field-precedence table documented at module level. A block
    /// that is present but missing its required field is a structural
    /// problem, not missing data: the caller should abort the assessment.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Structural` when a present block lacks its
    /// required field (e.g. a blood-pressure block without a systolic value).
    pub fn normalise(&self) -> AssessmentResult<VitalReading> {
        let blood_pressure = match &self.blood_pressure {
            None => None,
            Some(raw) => {
                let systolic = raw.systolic.or(raw.sys).ok_or_else(|| {
                    AssessmentError::Structural(
                        "blood pressure block present but systolic value missing".into(),
                    )
                })?;
                let diastolic = raw.diastolic.or(raw.dia).ok_or_else(|| {
                    AssessmentError::Structural(
                        "blood pressure block present but diastolic value missing".into(),
                    )
                })?;
                Some(BloodPressureSample {
                    systolic,
                    diastolic,
                    pulse: raw.pulse.or(raw.heart_rate),
                })
            }
        };

        let oximetry = match &self.oximetry {
            None => None,
            Some(raw) => {
                let percent = raw.percent.or(raw.spo2).ok_or_else(|| {
                    AssessmentError::Structural(
                        "oximetry block present but saturation percent missing".into(),
                    )
                })?;
                Some(OximetrySample {
                    percent,
                    perfusion_index: raw.pi.or(raw.perfusion_index),
                    pulse_rate: raw.pr.or(raw.pulse_rate),
                })
            }
        };

        let temperature = match &self.temperature {
            None => None,
            Some(raw) => {
                let value = raw.value.or(raw.temp).ok_or_else(|| {
                    AssessmentError::Structural(
                        "temperature block present but value missing".into(),
                    )
                })?;
                let site = raw
                    .location
                    .as_deref()
                    .or(raw.site.as_deref())
                    .map(|label| {
                        TemperatureSite::parse(label).unwrap_or_else(|_| {
                            tracing::debug!("unknown temperature site {label:?}, using axillary");
                            TemperatureSite::Axillary
                        })
                    })
                    .unwrap_or(TemperatureSite::Axillary);
                Some(TemperatureSample { value, site })
            }
        };

        Ok(VitalReading {
            blood_pressure,
            oximetry,
            temperature,
        })
    }
}
