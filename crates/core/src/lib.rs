//! # VHD Core
//!
//! Composite health-scoring engine for the VHD dashboard.
//!
//! One assessment pass takes a canonical [`reading::VitalReading`] through:
//! classification against injectable threshold tables, three sub-model
//! rubrics, the pairwise derivation rules, the weighted composite scorer,
//! and risk stratification. Every step is synchronous and pure; the whole
//! report is built fresh per call and never mutated afterwards.
//!
//! **No API concerns**: HTTP routing, the chat relay, and serialization of
//! transport envelopes belong in `api-rest`.

pub mod assessment;
pub mod charts;
pub mod classify;
pub mod composite;
pub mod config;
pub mod insights;
pub mod reading;
pub mod stratify;
pub mod submodel;
pub mod thresholds;

mod error;

pub use assessment::{AssessmentReport, AssessmentService, HealthAssessment};
pub use config::CoreConfig;
pub use error::{AssessmentError, AssessmentResult};
pub use reading::{RawDeviceRecord, VitalReading};
