//! Reference threshold tables for vital-sign classification.
//!
//! Pure data. The tables are injectable so that alternative rubrics can be
//! loaded from a scoring preset file; [`ThresholdTable::default`] carries the
//! clinical values the dashboard ships with.

use serde::{Deserialize, Serialize};
use vhd_types::TemperatureSite;

/// Upper bounds (exclusive) for one blood-pressure stage.
///
/// A reading falls in this stage when systolic < `systolic_below` and
/// diastolic < `diastolic_below`; either value crossing its bound pushes the
/// reading into the next stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpStageBounds {
    pub systolic_below: f64,
    pub diastolic_below: f64,
}

/// Blood-pressure staging table, ascending in severity.
///
/// Anything at or above the `stage2` bounds is stage 3 hypertension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloodPressureThresholds {
    pub normal: BpStageBounds,
    pub high_normal: BpStageBounds,
    pub stage1: BpStageBounds,
    pub stage2: BpStageBounds,
}

impl Default for BloodPressureThresholds {
    fn default() -> Self {
        Self {
            normal: BpStageBounds {
                systolic_below: 130.0,
                diastolic_below: 85.0,
            },
            high_normal: BpStageBounds {
                systolic_below: 140.0,
                diastolic_below: 90.0,
            },
            stage1: BpStageBounds {
                systolic_below: 160.0,
                diastolic_below: 100.0,
            },
            stage2: BpStageBounds {
                systolic_below: 180.0,
                diastolic_below: 110.0,
            },
        }
    }
}

/// Oxygen-saturation cutoffs in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OxygenThresholds {
    /// Below this is severe hypoxemia.
    pub severe_below: f64,
    /// Below this (but at or above `severe_below`) is mild hypoxemia.
    pub mild_below: f64,
}

impl Default for OxygenThresholds {
    fn default() -> Self {
        Self {
            severe_below: 90.0,
            mild_below: 95.0,
        }
    }
}

/// Normal temperature range for one measurement site, in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

/// Per-site normal ranges plus the margin that separates fever from high
/// fever (and low-normal from hypothermia).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureThresholds {
    pub axillary: TemperatureRange,
    pub oral: TemperatureRange,
    pub rectal: TemperatureRange,
    pub ear: TemperatureRange,
    pub forehead: TemperatureRange,
    /// Degrees beyond the range bound before the severe tier applies.
    pub severe_margin: f64,
}

impl TemperatureThresholds {
    /// Looks up the normal range for a measurement site.
    pub fn range(&self, site: TemperatureSite) -> TemperatureRange {
        match site {
            TemperatureSite::Axillary => self.axillary,
            TemperatureSite::Oral => self.oral,
            TemperatureSite::Rectal => self.rectal,
            TemperatureSite::Ear => self.ear,
            TemperatureSite::Forehead => self.forehead,
        }
    }
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            axillary: TemperatureRange {
                min: 36.0,
                max: 37.2,
            },
            oral: TemperatureRange {
                min: 36.3,
                max: 37.2,
            },
            rectal: TemperatureRange {
                min: 36.6,
                max: 37.8,
            },
            ear: TemperatureRange {
                min: 35.8,
                max: 38.0,
            },
            forehead: TemperatureRange {
                min: 36.1,
                max: 37.3,
            },
            severe_margin: 0.5,
        }
    }
}

/// Resting pulse cutoffs in beats per minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseThresholds {
    pub bradycardia_below: f64,
    pub tachycardia_above: f64,
    pub severe_tachycardia_above: f64,
}

impl Default for PulseThresholds {
    fn default() -> Self {
        Self {
            bradycardia_below: 50.0,
            tachycardia_above: 100.0,
            severe_tachycardia_above: 120.0,
        }
    }
}

/// The full set of classification thresholds used by one assessment pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTable {
    pub blood_pressure: BloodPressureThresholds,
    pub oxygen: OxygenThresholds,
    pub temperature: TemperatureThresholds,
    pub pulse: PulseThresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bp_stages_ascend() {
        let t = BloodPressureThresholds::default();
        assert!(t.normal.systolic_below < t.high_normal.systolic_below);
        assert!(t.high_normal.systolic_below < t.stage1.systolic_below);
        assert!(t.stage1.systolic_below < t.stage2.systolic_below);
        assert!(t.normal.diastolic_below < t.high_normal.diastolic_below);
        assert!(t.high_normal.diastolic_below < t.stage1.diastolic_below);
        assert!(t.stage1.diastolic_below < t.stage2.diastolic_below);
    }

    #[test]
    fn test_every_site_has_a_distinct_range() {
        let t = TemperatureThresholds::default();
        let sites = [
            TemperatureSite::Axillary,
            TemperatureSite::Oral,
            TemperatureSite::Rectal,
            TemperatureSite::Ear,
            TemperatureSite::Forehead,
        ];
        for site in sites {
            let range = t.range(site);
            assert!(range.min < range.max, "range inverted for {site}");
        }
        assert_eq!(t.range(TemperatureSite::Axillary).min, 36.0);
        assert_eq!(t.range(TemperatureSite::Axillary).max, 37.2);
    }

    #[test]
    fn test_threshold_table_yaml_round_trip_with_partial_override() {
        // Presets may override a single section; everything else defaults.
        let yaml = "oxygen:\n  severe_below: 88.0\n";
        let table: ThresholdTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.oxygen.severe_below, 88.0);
        assert_eq!(table.oxygen.mild_below, 95.0);
        assert_eq!(table.pulse.bradycardia_below, 50.0);
    }
}
