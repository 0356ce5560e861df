//! Findings: scored, traced detections returned to the caller.

use crate::{DecisionTrace, IdentifierType, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A surviving detection: one identifier occurrence in the analyzed text.
///
/// Offsets are byte offsets into the original text, `start < end`, and
/// `text == &original[start..end]`. Confidence is always in [0.0, 1.0].
/// Every finding owns its full [`DecisionTrace`]; nothing else references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Type of the detected identifier.
    pub identifier_type: IdentifierType,
    /// The matched text (surface form as it appears in the source).
    pub text: String,
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Final confidence score in [0.0, 1.0].
    pub confidence: f64,
    /// Name of the recognizer that produced this finding
    /// (e.g. "abn", "external", "custom-list").
    pub recognizer: String,
    /// Name of the pattern that matched, for pattern-based recognizers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_name: Option<String>,
    /// The pattern expression that matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Full audit trail of the confidence decision.
    pub trace: DecisionTrace,
}

impl Finding {
    /// Span length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty (never the case for valid findings).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if this finding's span overlaps `other`'s.
    #[must_use]
    pub fn overlaps(&self, other: &Finding) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Summary statistics over a findings collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FindingsStatistics {
    /// Total number of findings.
    pub total_count: usize,
    /// Count per identifier tag.
    pub type_counts: HashMap<String, usize>,
    /// Count per recognizer name.
    pub recognizer_counts: HashMap<String, usize>,
    /// Mean confidence (0.0 when empty).
    pub average_confidence: f64,
    /// Lowest confidence (0.0 when empty).
    pub min_confidence: f64,
    /// Highest confidence (0.0 when empty).
    pub max_confidence: f64,
}

/// An ordered collection of findings with filtering and export helpers.
///
/// The registry returns findings sorted by start offset; the helpers here
/// never disturb that order unless explicitly asked to re-sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FindingsCollection {
    /// The findings, in registry output order (ascending start offset).
    pub findings: Vec<Finding>,
}

impl FindingsCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing finding list.
    #[must_use]
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    /// Number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Returns true if there are no findings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings at or above a confidence threshold.
    #[must_use]
    pub fn filter_by_confidence(&self, min_confidence: f64) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.confidence >= min_confidence)
            .collect()
    }

    /// Findings whose identifier type is in the given set.
    #[must_use]
    pub fn filter_by_types(&self, types: &[IdentifierType]) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| types.contains(&f.identifier_type))
            .collect()
    }

    /// Re-sort findings by start offset (stable).
    pub fn sort_by_position(&mut self) {
        self.findings.sort_by_key(|f| f.start);
    }

    /// Count of findings per identifier tag.
    #[must_use]
    pub fn type_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for finding in &self.findings {
            *counts
                .entry(finding.identifier_type.as_str().to_string())
                .or_insert(0) += 1;
        }
        counts
    }

    /// Returns true if any two findings overlap.
    #[must_use]
    pub fn has_overlaps(&self) -> bool {
        let mut sorted: Vec<&Finding> = self.findings.iter().collect();
        sorted.sort_by_key(|f| f.start);
        sorted.windows(2).any(|w| w[0].end > w[1].start)
    }

    /// Remove overlapping findings, keeping the highest-confidence one.
    ///
    /// Ties go to the longer span. Survivors end up sorted by start offset.
    pub fn remove_overlapping(&mut self) {
        let mut ordered: Vec<Finding> = std::mem::take(&mut self.findings);
        ordered.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.len().cmp(&a.len()))
        });
        let mut kept: Vec<Finding> = Vec::new();
        for f in ordered {
            if !kept.iter().any(|k| k.overlaps(&f)) {
                kept.push(f);
            }
        }
        kept.sort_by_key(|f| f.start);
        self.findings = kept;
    }

    /// Summary statistics over the collection.
    #[must_use]
    pub fn statistics(&self) -> FindingsStatistics {
        if self.findings.is_empty() {
            return FindingsStatistics::default();
        }

        let mut recognizer_counts = HashMap::new();
        for finding in &self.findings {
            *recognizer_counts
                .entry(finding.recognizer.clone())
                .or_insert(0) += 1;
        }

        let confidences: Vec<f64> = self.findings.iter().map(|f| f.confidence).collect();
        let sum: f64 = confidences.iter().sum();

        FindingsStatistics {
            total_count: self.findings.len(),
            type_counts: self.type_counts(),
            recognizer_counts,
            average_confidence: sum / confidences.len() as f64,
            min_confidence: confidences.iter().cloned().fold(f64::MAX, f64::min),
            max_confidence: confidences.iter().cloned().fold(f64::MIN, f64::max),
        }
    }

    /// Export findings as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.findings)?)
    }

    /// Export findings as CSV (header + one row per finding).
    ///
    /// Matched text is quoted, with embedded quotes doubled.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut lines = vec![
            "identifier_type,text,start,end,confidence,recognizer,pattern_name".to_string(),
        ];
        for f in &self.findings {
            lines.push(format!(
                "{},\"{}\",{},{},{:.3},{},{}",
                f.identifier_type,
                f.text.replace('"', "\"\""),
                f.start,
                f.end,
                f.confidence,
                f.recognizer,
                f.pattern_name.as_deref().unwrap_or(""),
            ));
        }
        lines.join("\n")
    }
}

impl IntoIterator for FindingsCollection {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}

impl<'a> IntoIterator for &'a FindingsCollection {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(ty: IdentifierType, start: usize, end: usize, confidence: f64) -> Finding {
        Finding {
            identifier_type: ty,
            text: "x".repeat(end - start),
            start,
            end,
            confidence,
            recognizer: "test".to_string(),
            pattern_name: None,
            pattern: None,
            trace: DecisionTrace::default(),
        }
    }

    #[test]
    fn overlap_detection() {
        let a = finding(IdentifierType::Abn, 0, 10, 0.9);
        let b = finding(IdentifierType::Tfn, 5, 15, 0.8);
        let c = finding(IdentifierType::Tfn, 10, 15, 0.8);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
    }

    #[test]
    fn empty_statistics() {
        let stats = FindingsCollection::new().statistics();
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.average_confidence, 0.0);
    }

    #[test]
    fn statistics_aggregate() {
        let collection = FindingsCollection::from_findings(vec![
            finding(IdentifierType::Abn, 0, 11, 0.9),
            finding(IdentifierType::Abn, 20, 31, 0.7),
            finding(IdentifierType::Passport, 40, 48, 0.9),
        ]);
        let stats = collection.statistics();
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.type_counts["AU_ABN"], 2);
        assert_eq!(stats.type_counts["AU_PASSPORT"], 1);
        assert!((stats.min_confidence - 0.7).abs() < 1e-9);
        assert!((stats.max_confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn filter_by_confidence_keeps_threshold_matches() {
        let collection = FindingsCollection::from_findings(vec![
            finding(IdentifierType::Abn, 0, 11, 0.9),
            finding(IdentifierType::Tfn, 20, 29, 0.5),
        ]);
        let kept = collection.filter_by_confidence(0.9);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].identifier_type, IdentifierType::Abn);
    }

    #[test]
    fn csv_quotes_text() {
        let mut f = finding(IdentifierType::Abn, 0, 3, 0.9);
        f.text = "a\"b".to_string();
        let csv = FindingsCollection::from_findings(vec![f]).to_csv();
        assert!(csv.contains("\"a\"\"b\""));
    }

    #[test]
    fn remove_overlapping_keeps_highest_confidence() {
        let mut collection = FindingsCollection::from_findings(vec![
            finding(IdentifierType::Tfn, 0, 9, 0.6),
            finding(IdentifierType::Abn, 0, 11, 0.9),
            finding(IdentifierType::Passport, 20, 29, 0.9),
        ]);
        collection.remove_overlapping();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.findings[0].identifier_type, IdentifierType::Abn);
        assert_eq!(
            collection.findings[1].identifier_type,
            IdentifierType::Passport
        );
    }

    #[test]
    fn has_overlaps_on_unsorted_input() {
        let collection = FindingsCollection::from_findings(vec![
            finding(IdentifierType::Tfn, 5, 15, 0.8),
            finding(IdentifierType::Abn, 0, 10, 0.9),
        ]);
        assert!(collection.has_overlaps());
    }
}
