//! Confidence scoring - combines pattern strength, validation outcome, and
//! contextual cues into a final score plus an itemized adjustment trail.

use crate::patterns::Candidate;
use aupii_core::{Confidence, DecisionTrace, IdentifierType, ScoreAdjustment, ValidationOutcome};

/// Boost applied when structural validation passes.
pub const VALID_BOOST: f64 = 0.20;

/// Boost applied when a supportive context word precedes the match.
pub const CONTEXT_BOOST: f64 = 0.05;

/// How many whitespace-delimited tokens before the match are searched for
/// context words.
pub const CONTEXT_WINDOW: usize = 5;

/// Supportive context words per identifier type, matched case-insensitively.
fn context_words(ty: &IdentifierType) -> &'static [&'static str] {
    match ty {
        IdentifierType::Abn => &["abn", "business"],
        IdentifierType::Acn => &["acn", "company"],
        IdentifierType::Tfn => &["tfn", "tax"],
        IdentifierType::Medicare => &["medicare", "card", "number"],
        IdentifierType::MedicareProvider => &[
            "provider",
            "medicare",
            "number",
            "practitioner",
            "doctor",
            "gp",
            "medical",
        ],
        IdentifierType::DvaFileNumber => &[
            "dva",
            "veterans",
            "affairs",
            "file",
            "number",
            "veteran",
            "dependent",
        ],
        IdentifierType::Crn => &["crn", "centrelink", "customer", "reference", "number"],
        IdentifierType::Passport => &[
            "passport",
            "number",
            "travel",
            "document",
            "identification",
            "id",
        ],
        IdentifierType::DriversLicence => &[
            "license", "licence", "driving", "driver", "drivers", "dl", "permit",
        ],
        IdentifierType::MobilePhone | IdentifierType::LandlinePhone => &[
            "phone", "number", "telephone", "cell", "cellphone", "mobile", "call",
        ],
        IdentifierType::Generic(_) => &[],
    }
}

/// Score a validated candidate against its surrounding text.
///
/// Returns `None` when the candidate failed validation: a failed checksum is
/// strong evidence the span is not that identifier, so the candidate is
/// dropped rather than penalized. Phone numbers and other structural-only
/// types never fail validation, so they always score.
#[must_use]
pub fn score(
    candidate: &Candidate,
    outcome: &ValidationOutcome,
    text: &str,
) -> Option<(Confidence, DecisionTrace)> {
    let base = candidate.strength.base_score();
    let mut adjustments = Vec::new();

    match outcome {
        ValidationOutcome::Valid => {
            adjustments.push(ScoreAdjustment::new("structural validation passed", VALID_BOOST));
        }
        ValidationOutcome::Invalid { reason } => {
            log::debug!(
                "dropping {} candidate \"{}\" at {}: {}",
                candidate.identifier_type,
                candidate.text,
                candidate.start,
                reason
            );
            return None;
        }
    }

    let context_word = find_context_word(
        text,
        candidate.start,
        context_words(&candidate.identifier_type),
    );
    if let Some(word) = &context_word {
        adjustments.push(ScoreAdjustment::new(
            format!("context word \"{word}\""),
            CONTEXT_BOOST,
        ));
    }

    let raw: f64 = base + adjustments.iter().map(|a| a.delta).sum::<f64>();
    let confidence = Confidence::saturating(raw);
    if raw > 1.0 {
        adjustments.push(ScoreAdjustment::new("clamped to 1.0", 1.0 - raw));
    }

    let explanation = match &context_word {
        Some(word) => format!(
            "{} pattern \"{}\" matched and passed structural validation, supported by context word \"{}\"",
            candidate.identifier_type, candidate.pattern_name, word
        ),
        None => format!(
            "{} pattern \"{}\" matched and passed structural validation",
            candidate.identifier_type, candidate.pattern_name
        ),
    };

    let trace = DecisionTrace {
        original_score: base,
        final_score: confidence.get(),
        adjustments,
        explanation,
        context_word,
        validation: Some(outcome.clone()),
        pattern_name: Some(candidate.pattern_name.to_string()),
        pattern: Some(candidate.pattern.to_string()),
    };
    Some((confidence, trace))
}

/// Search the last `CONTEXT_WINDOW` tokens before `start` for any of the
/// given words. Tokens are compared case-insensitively with surrounding
/// punctuation stripped.
fn find_context_word(text: &str, start: usize, words: &[&str]) -> Option<String> {
    let preceding = text.get(..start)?;
    preceding
        .split_whitespace()
        .rev()
        .take(CONTEXT_WINDOW)
        .find_map(|token| {
            let token = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            words.iter().find(|w| **w == token).map(ToString::to_string)
        })
}
