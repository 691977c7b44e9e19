//! Core scoring configuration.
//!
//! Configuration is resolved once at startup and passed into the assessment
//! service, so no threshold or weight is read from the environment during a
//! scoring pass. A preset can be loaded from a YAML file; omitted sections
//! fall back to the shipped defaults, which lets a preset override a single
//! table without restating the rest.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::composite::SubModelWeights;
use crate::thresholds::ThresholdTable;
use crate::{AssessmentError, AssessmentResult};

/// Scoring configuration resolved at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    weights: SubModelWeights,
    thresholds: ThresholdTable,
}

/// On-disk preset shape. Both sections optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ScoringPreset {
    weights: SubModelWeights,
    thresholds: ThresholdTable,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            weights: SubModelWeights::default(),
            thresholds: ThresholdTable::default(),
        }
    }
}

impl CoreConfig {
    /// Creates a configuration from explicit tables.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::InvalidWeights` if the weight table fails
    /// validation.
    pub fn new(weights: SubModelWeights, thresholds: ThresholdTable) -> AssessmentResult<Self> {
        weights.validate()?;
        Ok(Self {
            weights,
            thresholds,
        })
    }

    /// Loads a scoring preset from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigRead` if the file cannot be read, `ConfigParse` if the
    /// YAML is malformed, or `InvalidWeights` if the preset's weights fail
    /// validation.
    pub fn from_yaml_file(path: &Path) -> AssessmentResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(AssessmentError::ConfigRead)?;
        let preset: ScoringPreset =
            serde_yaml::from_str(&contents).map_err(AssessmentError::ConfigParse)?;
        Self::new(preset.weights, preset.thresholds)
    }

    pub fn weights(&self) -> &SubModelWeights {
        &self.weights
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }
}
