//! # aupii
//!
//! Australian structured-identifier (PII) detection: regex extraction,
//! algorithmic validation, explainable confidence scoring, and overlap
//! resolution across recognizer sources.
//!
//! The pipeline, leaf-first:
//!
//! - [`patterns`]: regex-based candidate generation per identifier type
//! - [`validators`]: per-type checksum / lookup-table / digit-class checks
//! - [`scorer`]: base strength + validation outcome + context cues, with an
//!   itemized adjustment trail
//! - [`registry`]: allow/deny-list overrides, external-candidate merging,
//!   overlap resolution, final ordering
//!
//! # Example
//!
//! ```rust
//! use aupii::{EvaluationConfig, Registry};
//!
//! let registry = Registry::new(EvaluationConfig::default()).unwrap();
//! let findings = registry.evaluate("ABN: 51 824 753 556", &[]);
//!
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].identifier_type.as_str(), "AU_ABN");
//! assert!(findings[0].confidence >= 0.9);
//! ```
//!
//! Evaluation is a pure function of the text, the registry's configuration,
//! and the external candidate list. Independent identifier types are
//! evaluated in parallel, but the output is deterministic under any
//! scheduling.

#![warn(missing_docs)]

pub mod external;
pub mod patterns;
pub mod registry;
pub mod scorer;
pub mod validators;

pub use aupii_core::{
    Confidence, DecisionTrace, Error, Finding, FindingsCollection, FindingsStatistics,
    IdentifierType, Result, ScoreAdjustment, ValidationOutcome,
};
pub use external::ExternalCandidate;
pub use patterns::{extract, Candidate, Strength};
pub use registry::{EvaluationConfig, Registry, LIST_RECOGNIZER};
pub use scorer::score;
pub use validators::validate;
