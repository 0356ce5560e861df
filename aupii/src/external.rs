//! Bridge for candidates produced by an external statistical NER engine.

use aupii_core::IdentifierType;
use serde::{Deserialize, Serialize};

/// A candidate supplied by an external recognizer (e.g. a statistical NER
/// engine covering PERSON, EMAIL_ADDRESS and similar broad categories).
///
/// The registry treats these exactly like internally produced candidates:
/// they pass through the allow-list filter, overlap resolution, and the
/// confidence threshold. Their score is taken as-is (clamped to [0, 1]);
/// no validation or context boosting is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalCandidate {
    /// Category assigned by the external engine.
    pub identifier_type: IdentifierType,
    /// Start byte offset into the analyzed text (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Base score reported by the external engine.
    pub score: f64,
    /// Name of the external recognizer that produced the candidate.
    pub recognizer: String,
}

impl ExternalCandidate {
    /// Convenience constructor wrapping the category name in
    /// [`IdentifierType::Generic`].
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        start: usize,
        end: usize,
        score: f64,
        recognizer: impl Into<String>,
    ) -> Self {
        Self {
            identifier_type: IdentifierType::Generic(category.into()),
            start,
            end,
            score,
            recognizer: recognizer.into(),
        }
    }
}
