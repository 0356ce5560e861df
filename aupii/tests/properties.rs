//! Property tests over the whole evaluation pipeline.

use aupii::{EvaluationConfig, ExternalCandidate, Registry};
use proptest::prelude::*;

proptest! {
    // Evaluation never panics and every finding respects the span and
    // confidence invariants, for any input text.
    #[test]
    fn findings_respect_invariants(text in "\\PC{0,80}") {
        let registry = Registry::new(EvaluationConfig::default()).unwrap();
        let findings = registry.evaluate(&text, &[]);
        for f in &findings {
            prop_assert!(f.start < f.end);
            prop_assert!(f.end <= text.len());
            prop_assert_eq!(&text[f.start..f.end], f.text.as_str());
            prop_assert!((0.0..=1.0).contains(&f.confidence));
            prop_assert!((0.0..=1.0).contains(&f.trace.final_score));
        }
        for pair in findings.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
        }
    }

    #[test]
    fn evaluation_is_a_pure_function(text in "\\PC{0,80}", score in 0.0f64..=1.0) {
        let registry = Registry::new(EvaluationConfig::default()).unwrap();
        let end = text.len().min(4);
        let external = if end > 0 && text.is_char_boundary(end) {
            vec![ExternalCandidate::new("PERSON", 0, end, score, "ner-engine")]
        } else {
            Vec::new()
        };
        let first = registry.evaluate(&text, &external);
        let second = registry.evaluate(&text, &external);
        prop_assert_eq!(first, second);
    }

    // No finding survives below the threshold except deny-list injections,
    // which always score 1.0.
    #[test]
    fn threshold_is_honored(text in "\\PC{0,80}", threshold in 0.0f64..=1.0) {
        let config = EvaluationConfig { threshold, ..Default::default() };
        let registry = Registry::new(config).unwrap();
        for f in registry.evaluate(&text, &[]) {
            prop_assert!(f.confidence >= threshold);
        }
    }

    // Findings never overlap after resolution.
    #[test]
    fn findings_are_disjoint(text in "\\PC{0,80}") {
        let registry = Registry::new(EvaluationConfig::default()).unwrap();
        let findings = registry.evaluate(&text, &[]);
        for pair in findings.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }
}
