//! End-to-end registry behavior: extraction through validation, scoring,
//! list overrides, overlap resolution, and output ordering.

use aupii::{
    EvaluationConfig, ExternalCandidate, FindingsCollection, IdentifierType, Registry,
    ValidationOutcome, LIST_RECOGNIZER,
};

fn default_registry() -> Registry {
    Registry::new(EvaluationConfig::default()).unwrap()
}

#[test]
fn abn_with_label_scores_high() {
    let findings = default_registry().evaluate("ABN: 51 824 753 556", &[]);
    assert_eq!(findings.len(), 1);
    let f = &findings[0];
    assert_eq!(f.identifier_type, IdentifierType::Abn);
    assert_eq!(f.text, "51 824 753 556");
    assert!(f.confidence >= 0.9);
    assert_eq!(f.trace.validation, Some(ValidationOutcome::Valid));
    assert_eq!(f.trace.context_word.as_deref(), Some("abn"));
}

#[test]
fn mobile_phone_scores_high() {
    let findings = default_registry().evaluate("Call me on 0412 345 678", &[]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].identifier_type, IdentifierType::MobilePhone);
    assert!(findings[0].confidence >= 0.85);
}

#[test]
fn bare_passport_scores_exactly_090() {
    let findings = default_registry().evaluate("PA1234567", &[]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].identifier_type, IdentifierType::Passport);
    assert!((findings[0].confidence - 0.90).abs() < 1e-9);
}

#[test]
fn disallowed_passport_letter_yields_nothing() {
    let findings = default_registry().evaluate("AQ1234567", &[]);
    assert!(findings.is_empty());
}

#[test]
fn medicare_card_with_context() {
    let findings = default_registry().evaluate("Medicare 2123 45670 1", &[]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].identifier_type, IdentifierType::Medicare);
    assert_eq!(findings[0].trace.context_word.as_deref(), Some("medicare"));
}

#[test]
fn empty_and_whitespace_text_yield_nothing() {
    let registry = default_registry();
    assert!(registry.evaluate("", &[]).is_empty());
    assert!(registry.evaluate("   \n\t  ", &[]).is_empty());
}

#[test]
fn allow_list_suppresses_valid_match() {
    let config = EvaluationConfig {
        allow_list: vec!["PA1234567".to_string()],
        ..Default::default()
    };
    let registry = Registry::new(config).unwrap();
    assert!(registry.evaluate("Passport PA1234567", &[]).is_empty());
}

#[test]
fn allow_list_is_case_insensitive_by_default() {
    let config = EvaluationConfig {
        allow_list: vec!["pa1234567".to_string()],
        ..Default::default()
    };
    let registry = Registry::new(config).unwrap();
    assert!(registry.evaluate("PA1234567", &[]).is_empty());
}

#[test]
fn deny_list_injects_without_pattern_match() {
    let config = EvaluationConfig {
        deny_list: vec!["Falcon-7".to_string()],
        ..Default::default()
    };
    let registry = Registry::new(config).unwrap();
    let text = "code name Falcon-7 appears";
    let findings = registry.evaluate(text, &[]);
    assert_eq!(findings.len(), 1);
    let f = &findings[0];
    assert_eq!(f.recognizer, LIST_RECOGNIZER);
    assert_eq!(f.confidence, 1.0);
    assert_eq!(f.text, "Falcon-7");
    assert_eq!(&text[f.start..f.end], "Falcon-7");
}

#[test]
fn deny_list_beats_allow_list() {
    let config = EvaluationConfig {
        allow_list: vec!["PA1234567".to_string()],
        deny_list: vec!["PA1234567".to_string()],
        ..Default::default()
    };
    let registry = Registry::new(config).unwrap();
    let findings = registry.evaluate("Passport PA1234567", &[]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].recognizer, LIST_RECOGNIZER);
    assert_eq!(findings[0].confidence, 1.0);
}

#[test]
fn overlapping_external_candidates_keep_highest_score() {
    let text = "John Smith called";
    let external = vec![
        ExternalCandidate::new("ORG", 0, 10, 0.6, "ner-engine"),
        ExternalCandidate::new("PERSON", 0, 10, 0.9, "ner-engine"),
    ];
    let findings = default_registry().evaluate(text, &external);
    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].identifier_type,
        IdentifierType::Generic("PERSON".to_string())
    );
    assert!((findings[0].confidence - 0.9).abs() < 1e-9);
}

#[test]
fn disjoint_external_and_custom_findings_are_both_kept() {
    let text = "Jane saw passport PA1234567";
    let external = vec![ExternalCandidate::new("PERSON", 0, 4, 0.85, "ner-engine")];
    let findings = default_registry().evaluate(text, &external);
    assert_eq!(findings.len(), 2);
    assert_eq!(
        findings[0].identifier_type,
        IdentifierType::Generic("PERSON".to_string())
    );
    assert_eq!(findings[1].identifier_type, IdentifierType::Passport);
    assert!(findings[0].start < findings[1].start);
}

#[test]
fn external_candidates_can_be_disabled() {
    let config = EvaluationConfig {
        use_external: false,
        ..Default::default()
    };
    let registry = Registry::new(config).unwrap();
    let external = vec![ExternalCandidate::new("PERSON", 0, 4, 0.85, "ner-engine")];
    assert!(registry.evaluate("Jane went home", &external).is_empty());
}

#[test]
fn external_candidate_with_invalid_span_is_discarded() {
    let external = vec![
        ExternalCandidate::new("PERSON", 3, 2, 0.9, "ner-engine"),
        ExternalCandidate::new("PERSON", 0, 999, 0.9, "ner-engine"),
    ];
    assert!(default_registry().evaluate("short", &external).is_empty());
}

#[test]
fn threshold_filters_low_scores_but_not_deny_injections() {
    let config = EvaluationConfig {
        threshold: 0.99,
        deny_list: vec!["secret".to_string()],
        ..Default::default()
    };
    let registry = Registry::new(config).unwrap();
    let findings = registry.evaluate("secret passport PA1234567", &[]);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].recognizer, LIST_RECOGNIZER);
}

#[test]
fn disabled_types_are_not_evaluated() {
    let config = EvaluationConfig {
        enabled_types: vec!["AU_PASSPORT".to_string()],
        ..Default::default()
    };
    let registry = Registry::new(config).unwrap();
    assert!(registry.evaluate("ABN: 51 824 753 556", &[]).is_empty());
}

#[test]
fn evaluation_is_deterministic() {
    let registry = default_registry();
    let text = "ABN 51 824 753 556, TFN 123 456 782, call 0412 345 678, \
                passport PA1234567, Medicare 2123 45670 1";
    let external = vec![ExternalCandidate::new("PERSON", 0, 3, 0.7, "ner-engine")];
    let first = registry.evaluate(text, &external);
    let second = registry.evaluate(text, &external);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn findings_are_sorted_and_in_bounds() {
    let text = "TFN 123 456 782 then passport PA1234567 then 0412 345 678";
    let findings = default_registry().evaluate(text, &[]);
    assert!(findings.len() >= 3);
    for pair in findings.windows(2) {
        assert!(pair[0].start <= pair[1].start);
    }
    for f in &findings {
        assert!(f.start < f.end);
        assert!(f.end <= text.len());
        assert_eq!(&text[f.start..f.end], f.text);
        assert!((0.0..=1.0).contains(&f.confidence));
    }
}

#[test]
fn collection_helpers_work_on_evaluate_output() {
    let text = "passport PA1234567 and TFN 123 456 782";
    let findings = default_registry().evaluate(text, &[]);
    let collection = FindingsCollection::from_findings(findings);
    assert!(!collection.has_overlaps());

    let stats = collection.statistics();
    assert_eq!(stats.total_count, collection.len());
    assert!(stats.max_confidence <= 1.0);

    let json = collection.to_json().unwrap();
    assert!(json.contains("AU_PASSPORT"));
    let csv = collection.to_csv();
    assert!(csv.starts_with("identifier_type,"));
}
