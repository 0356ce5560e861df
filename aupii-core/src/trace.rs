//! Decision traces: the audit record behind every finding's score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a structural validation check.
///
/// Validators are total functions: any string claiming to be a given
/// identifier type produces either `Valid` or `Invalid` with a reason.
/// They never panic and never return an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    /// The candidate passed its checksum/lookup/digit-class check.
    Valid,
    /// The candidate failed, with a human-readable reason.
    Invalid {
        /// Why the check failed (e.g. "checksum mismatch", "wrong length").
        reason: String,
    },
}

impl ValidationOutcome {
    /// Construct an `Invalid` outcome.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        ValidationOutcome::Invalid {
            reason: reason.into(),
        }
    }

    /// Returns true for `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Valid => write!(f, "valid"),
            ValidationOutcome::Invalid { reason } => write!(f, "invalid: {}", reason),
        }
    }
}

/// A single scoring step: why the score moved, and by how much.
///
/// Adjustments exist for audit only - downstream code must never branch on
/// them. The authoritative value is the finding's final confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    /// Human-readable reason (e.g. "checksum valid", "context word 'abn'").
    pub reason: String,
    /// Signed score delta applied at this step.
    pub delta: f64,
}

impl ScoreAdjustment {
    /// Create an adjustment.
    #[must_use]
    pub fn new(reason: impl Into<String>, delta: f64) -> Self {
        Self {
            reason: reason.into(),
            delta,
        }
    }
}

/// Full audit record of how a finding's confidence was derived.
///
/// Assembled once by the scorer and carried by the finding unchanged; the
/// registry never recomputes or reduces it. A presentation layer may choose
/// to show a short or detailed view, but that choice is external to this
/// crate - the trace always holds complete information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DecisionTrace {
    /// Score before any adjustment (the pattern's base strength).
    pub original_score: f64,
    /// Score after all adjustments and clamping.
    pub final_score: f64,
    /// Ordered adjustments applied between original and final score.
    pub adjustments: Vec<ScoreAdjustment>,
    /// One-line human-readable explanation of the decision.
    pub explanation: String,
    /// Context word that boosted the score, if one was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_word: Option<String>,
    /// Structural validation outcome, if the type has a validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationOutcome>,
    /// Name of the pattern that produced the candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_name: Option<String>,
    /// The pattern expression itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl DecisionTrace {
    /// Net delta of all recorded adjustments.
    #[must_use]
    pub fn total_adjustment(&self) -> f64 {
        self.adjustments.iter().map(|a| a.delta).sum()
    }
}
