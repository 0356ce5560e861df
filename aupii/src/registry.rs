//! Recognizer registry - owns the full recognizer set, applies allow/deny
//! lists, resolves overlapping candidates, and returns the final ordered
//! finding list.

use crate::{patterns, scorer, validators, ExternalCandidate};
use aupii_core::{Confidence, DecisionTrace, Error, Finding, IdentifierType, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Recognizer name attached to deny-list injections.
pub const LIST_RECOGNIZER: &str = "custom-list";

/// Per-evaluation configuration, validated once at registry construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Identifier tags to evaluate (e.g. `"AU_ABN"`). Unknown tags are a
    /// configuration error.
    pub enabled_types: Vec<String>,
    /// Minimum confidence for a finding to be returned. Out-of-range values
    /// are clamped to [0, 1].
    pub threshold: f64,
    /// Literals never reported as findings, regardless of score.
    pub allow_list: Vec<String>,
    /// Literals always reported as findings, regardless of pattern matching.
    pub deny_list: Vec<String>,
    /// Whether allow/deny-list comparison is case sensitive (ASCII folding
    /// when insensitive).
    pub case_sensitive_lists: bool,
    /// Whether externally supplied candidates participate in evaluation.
    pub use_external: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            enabled_types: IdentifierType::CUSTOM
                .iter()
                .map(|ty| ty.as_str().to_string())
                .collect(),
            threshold: 0.5,
            allow_list: Vec::new(),
            deny_list: Vec::new(),
            case_sensitive_lists: false,
            use_external: true,
        }
    }
}

// Fixed source priority for overlap tie-breaking: deny-list injections beat
// custom recognizers, which beat the external engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Priority {
    External = 0,
    Custom = 1,
    DenyList = 2,
}

// A scored candidate awaiting list filtering and overlap resolution.
struct Scored {
    identifier_type: IdentifierType,
    text: String,
    start: usize,
    end: usize,
    confidence: f64,
    recognizer: String,
    pattern_name: Option<String>,
    pattern: Option<String>,
    trace: DecisionTrace,
    priority: Priority,
}

impl Scored {
    fn into_finding(self) -> Finding {
        Finding {
            identifier_type: self.identifier_type,
            text: self.text,
            start: self.start,
            end: self.end,
            confidence: self.confidence,
            recognizer: self.recognizer,
            pattern_name: self.pattern_name,
            pattern: self.pattern,
            trace: self.trace,
        }
    }

    fn overlaps(&self, other: &Scored) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The recognizer registry.
///
/// Constructed once from a validated configuration and passed by reference
/// into each [`Registry::evaluate`] call; it holds no mutable state, so a
/// single instance may be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Registry {
    enabled: Vec<IdentifierType>,
    threshold: f64,
    allow_list: Vec<String>,
    deny_list: Vec<String>,
    case_sensitive: bool,
    use_external: bool,
}

impl Registry {
    /// Build a registry, validating the configuration up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifierType`] if `enabled_types` names a
    /// tag with no registered recognizer. No evaluation happens on error.
    pub fn new(config: EvaluationConfig) -> Result<Self> {
        let mut requested = Vec::new();
        for tag in &config.enabled_types {
            let ty = IdentifierType::from_tag(tag)
                .ok_or_else(|| Error::UnknownIdentifierType(tag.clone()))?;
            if !requested.contains(&ty) {
                requested.push(ty);
            }
        }
        // Evaluation always runs in registration order, whatever order the
        // configuration listed the tags in.
        let enabled: Vec<IdentifierType> = IdentifierType::CUSTOM
            .iter()
            .filter(|ty| requested.contains(ty))
            .cloned()
            .collect();
        Ok(Self {
            enabled,
            threshold: Confidence::saturating(config.threshold).get(),
            allow_list: config.allow_list,
            deny_list: config.deny_list,
            case_sensitive: config.case_sensitive_lists,
            use_external: config.use_external,
        })
    }

    /// The identifier types this registry evaluates, in registration order.
    #[must_use]
    pub fn enabled_types(&self) -> &[IdentifierType] {
        &self.enabled
    }

    /// The effective (clamped) confidence threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluate `text`, returning findings sorted by start offset.
    ///
    /// A pure function of the text, this registry's configuration, and the
    /// external candidate list: identical inputs give identical output, and
    /// the result does not depend on internal scheduling.
    #[must_use]
    pub fn evaluate(&self, text: &str, external: &[ExternalCandidate]) -> Vec<Finding> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut pool: Vec<Scored> = self
            .enabled
            .par_iter()
            .flat_map_iter(|ty| self.evaluate_type(text, ty))
            .collect();

        if self.use_external {
            pool.extend(self.accept_external(text, external));
        }

        pool.retain(|cand| {
            let suppressed = self.allow_listed(&cand.text);
            if suppressed {
                log::debug!(
                    "allow-list suppresses \"{}\" at {}..{}",
                    cand.text,
                    cand.start,
                    cand.end
                );
            }
            !suppressed
        });

        // Deny injections are added after the allow filter, so a literal
        // present in both lists is still reported.
        pool.extend(self.inject_deny_list(text));

        let survivors = resolve_overlaps(pool);

        let mut findings: Vec<Finding> = survivors
            .into_iter()
            .filter(|cand| cand.confidence >= self.threshold)
            .map(Scored::into_finding)
            .collect();
        findings.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| type_rank(&a.identifier_type).cmp(&type_rank(&b.identifier_type)))
        });
        findings
    }

    fn evaluate_type(&self, text: &str, ty: &IdentifierType) -> Vec<Scored> {
        patterns::extract(text, ty)
            .into_iter()
            .filter_map(|cand| {
                let outcome = validators::validate(ty, &cand.text);
                scorer::score(&cand, &outcome, text).map(|(confidence, trace)| Scored {
                    identifier_type: cand.identifier_type,
                    text: cand.text,
                    start: cand.start,
                    end: cand.end,
                    confidence: confidence.get(),
                    recognizer: recognizer_name(ty).to_string(),
                    pattern_name: Some(cand.pattern_name.to_string()),
                    pattern: Some(cand.pattern.to_string()),
                    trace,
                    priority: Priority::Custom,
                })
            })
            .collect()
    }

    fn accept_external(&self, text: &str, external: &[ExternalCandidate]) -> Vec<Scored> {
        external
            .iter()
            .filter_map(|ec| {
                let slice = if ec.start < ec.end {
                    text.get(ec.start..ec.end)
                } else {
                    None
                };
                let Some(slice) = slice else {
                    log::warn!(
                        "discarding external candidate from \"{}\" with invalid span {}..{}",
                        ec.recognizer,
                        ec.start,
                        ec.end
                    );
                    return None;
                };
                let confidence = Confidence::saturating(ec.score).get();
                let trace = DecisionTrace {
                    original_score: confidence,
                    final_score: confidence,
                    explanation: format!(
                        "supplied by external recognizer \"{}\"",
                        ec.recognizer
                    ),
                    ..Default::default()
                };
                Some(Scored {
                    identifier_type: ec.identifier_type.clone(),
                    text: slice.to_string(),
                    start: ec.start,
                    end: ec.end,
                    confidence,
                    recognizer: ec.recognizer.clone(),
                    pattern_name: None,
                    pattern: None,
                    trace,
                    priority: Priority::External,
                })
            })
            .collect()
    }

    fn allow_listed(&self, matched: &str) -> bool {
        self.allow_list.iter().any(|literal| {
            if self.case_sensitive {
                literal == matched
            } else {
                literal.eq_ignore_ascii_case(matched)
            }
        })
    }

    fn inject_deny_list(&self, text: &str) -> Vec<Scored> {
        let mut out = Vec::new();
        for literal in &self.deny_list {
            for (start, end) in find_occurrences(text, literal, self.case_sensitive) {
                log::debug!("deny-list injects \"{literal}\" at {start}..{end}");
                let trace = DecisionTrace {
                    original_score: 1.0,
                    final_score: 1.0,
                    explanation: format!("deny-listed literal \"{literal}\""),
                    ..Default::default()
                };
                out.push(Scored {
                    identifier_type: IdentifierType::Generic("CUSTOM_LIST".to_string()),
                    text: text[start..end].to_string(),
                    start,
                    end,
                    confidence: 1.0,
                    recognizer: LIST_RECOGNIZER.to_string(),
                    pattern_name: None,
                    pattern: None,
                    trace,
                    priority: Priority::DenyList,
                });
            }
        }
        out
    }
}

fn recognizer_name(ty: &IdentifierType) -> &'static str {
    match ty {
        IdentifierType::Abn => "abn",
        IdentifierType::Acn => "acn",
        IdentifierType::Tfn => "tfn",
        IdentifierType::Medicare => "medicare",
        IdentifierType::MedicareProvider => "medicare-provider",
        IdentifierType::DvaFileNumber => "dva",
        IdentifierType::Crn => "crn",
        IdentifierType::Passport => "passport",
        IdentifierType::DriversLicence => "drivers-licence",
        IdentifierType::MobilePhone => "phone-mobile",
        IdentifierType::LandlinePhone => "phone-landline",
        IdentifierType::Generic(_) => "external",
    }
}

fn type_rank(ty: &IdentifierType) -> usize {
    IdentifierType::CUSTOM
        .iter()
        .position(|t| t == ty)
        .unwrap_or(IdentifierType::CUSTOM.len())
}

// Keep the best candidate of every overlapping group: highest score, then
// longer span, then source priority. The comparator is a total order over
// distinct candidates, so the survivor set does not depend on pool order.
fn resolve_overlaps(mut pool: Vec<Scored>) -> Vec<Scored> {
    pool.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| (b.end - b.start).cmp(&(a.end - a.start)))
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| a.end.cmp(&b.end))
            .then_with(|| type_rank(&a.identifier_type).cmp(&type_rank(&b.identifier_type)))
            .then_with(|| a.recognizer.cmp(&b.recognizer))
    });
    let mut kept: Vec<Scored> = Vec::new();
    for cand in pool {
        if let Some(winner) = kept.iter().find(|k| k.overlaps(&cand)) {
            log::debug!(
                "overlap resolution drops \"{}\" ({:.2}) in favor of \"{}\" ({:.2})",
                cand.text,
                cand.confidence,
                winner.text,
                winner.confidence
            );
            continue;
        }
        kept.push(cand);
    }
    kept
}

fn find_occurrences(text: &str, literal: &str, case_sensitive: bool) -> Vec<(usize, usize)> {
    if literal.is_empty() {
        return Vec::new();
    }
    if case_sensitive {
        return text
            .match_indices(literal)
            .map(|(i, m)| (i, i + m.len()))
            .collect();
    }
    // ASCII case folding only; non-ASCII literals match exactly.
    let n = literal.len();
    let mut out = Vec::new();
    let mut i = 0;
    while i + n <= text.len() {
        if text.is_char_boundary(i)
            && text.is_char_boundary(i + n)
            && text[i..i + n].eq_ignore_ascii_case(literal)
        {
            out.push((i, i + n));
            i += n;
        } else {
            i += 1;
        }
    }
    out
}
