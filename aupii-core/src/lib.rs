//! # aupii-core
//!
//! Core data model for Australian structured-identifier (PII) detection.
//!
//! This crate holds the types shared by the detection engine and anything
//! downstream of it (reporting, anonymization, export):
//!
//! - [`IdentifierType`]: the closed set of identifier tags
//! - [`Confidence`]: a score guaranteed to be in [0.0, 1.0]
//! - [`ValidationOutcome`]: result of a structural (checksum/lookup) check
//! - [`DecisionTrace`] / [`ScoreAdjustment`]: the audit trail behind a score
//! - [`Finding`] / [`FindingsCollection`]: scored, traced detections
//!
//! The detection engine itself (regex tables, validators, scorer, registry)
//! lives in the `aupii` crate.

#![warn(missing_docs)]

pub mod confidence;
pub mod error;
pub mod finding;
pub mod identifier;
pub mod trace;

pub use confidence::Confidence;
pub use error::{Error, Result};
pub use finding::{Finding, FindingsCollection, FindingsStatistics};
pub use identifier::IdentifierType;
pub use trace::{DecisionTrace, ScoreAdjustment, ValidationOutcome};
