//! Pattern extraction - regex-based candidate generation per identifier type.
//!
//! Each identifier type owns one or more named patterns, highest-priority
//! first. Extraction is deliberately permissive: patterns encode shape only
//! (digit groupings, letter classes, separators), and anything they match is
//! handed to the structural validators. Overlapping matches are not
//! deduplicated here - that is the registry's job.

use aupii_core::IdentifierType;
use once_cell::sync::Lazy;
use regex::Regex;

/// Base strength of a pattern, before validation or context adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strength {
    /// Loose shape, high false-positive rate (base 0.40).
    Weak,
    /// Distinctive shape with common collisions (base 0.60).
    Medium,
    /// Highly distinctive shape (base 0.70).
    Strong,
}

impl Strength {
    /// The base confidence contributed by a pattern of this strength.
    #[must_use]
    pub fn base_score(self) -> f64 {
        match self {
            Strength::Weak => 0.40,
            Strength::Medium => 0.60,
            Strength::Strong => 0.70,
        }
    }
}

/// A span tentatively matching an identifier's shape, prior to validation.
///
/// Candidates are per-evaluation values; they are consumed by the scorer and
/// never persist across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The identifier type whose pattern produced this match.
    pub identifier_type: IdentifierType,
    /// Start byte offset into the source text (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// The matched text exactly as it appears in the source.
    pub text: String,
    /// Name of the pattern that matched.
    pub pattern_name: &'static str,
    /// The pattern expression itself.
    pub pattern: &'static str,
    /// Base strength of the producing pattern.
    pub strength: Strength,
}

struct PatternSpec {
    name: &'static str,
    expr: &'static str,
    regex: &'static Lazy<Regex>,
    strength: Strength,
}

// Static regex patterns - compiled once, reused forever.

const ABN_EXPR: &str = r"\b\d{2}[ -]?\d{3}[ -]?\d{3}[ -]?\d{3}\b";
static ABN: Lazy<Regex> = Lazy::new(|| Regex::new(ABN_EXPR).expect("valid regex"));

// 9 digits with optional 3-3-3 grouping; shared by ACN and 9-digit TFN shapes.
const NINE_DIGIT_EXPR: &str = r"\b\d{3}[ -]?\d{3}[ -]?\d{3}\b";
static NINE_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(NINE_DIGIT_EXPR).expect("valid regex"));

const TFN_8_EXPR: &str = r"\b\d{3}[ -]?\d{3}[ -]?\d{2}\b";
static TFN_8: Lazy<Regex> = Lazy::new(|| Regex::new(TFN_8_EXPR).expect("valid regex"));

// Card numbers start with 2-6; 4-5-1 grouping, trailing card-issue digit.
const MEDICARE_EXPR: &str = r"\b[2-6]\d{3}[ -]?\d{5}[ -]?\d\b";
static MEDICARE: Lazy<Regex> = Lazy::new(|| Regex::new(MEDICARE_EXPR).expect("valid regex"));

// 6-digit stem + practice-location character + check letter.
const PROVIDER_EXPR: &str = r"\b\d{6}[0-9A-Za-z][A-Za-z]\b";
static PROVIDER: Lazy<Regex> = Lazy::new(|| Regex::new(PROVIDER_EXPR).expect("valid regex"));

// State letter + war code (letters or space) + digits + optional dependant
// letter. Loose on purpose; the validator carries the real rules.
const DVA_EXPR: &str = r"(?i)\b[NVQWST][A-Z ]?[A-Z0-9]{1,6}[A-Z]?\b";
static DVA: Lazy<Regex> = Lazy::new(|| Regex::new(DVA_EXPR).expect("valid regex"));

// State digit + 8 digits (optional 3-3-2 grouping) + check letter + optional
// dependant indicator.
const CRN_EXPR: &str =
    r"(?i)\b[2-7][\s-]?(?:\d{3}[\s-]?\d{3}[\s-]?\d{2}|\d{8})[ABCHJKLSTVX][A-Z ]?\b";
static CRN: Lazy<Regex> = Lazy::new(|| Regex::new(CRN_EXPR).expect("valid regex"));

// Letter validity (O, S, Q, I excluded) is checked by the validator.
const PASSPORT_EXPR: &str = r"\b[A-Za-z]{1,2}\d{7}\b";
static PASSPORT: Lazy<Regex> = Lazy::new(|| Regex::new(PASSPORT_EXPR).expect("valid regex"));

const LICENCE_EXPR: &str = r"(?i)\b(?:[A-Z]\d{5}|[A-Z]{2}\d{4}|\d{4}[A-Z]{2}|\d{3}[\s-]\d{3}[\s-]\d{3}|\d[\s-]\d{3}[\s-]\d{3}[\s-]\d{3}|\d{6,10})\b";
static LICENCE: Lazy<Regex> = Lazy::new(|| Regex::new(LICENCE_EXPR).expect("valid regex"));

const MOBILE_EXPR: &str = r"\b04\d{2}[ -]?\d{3}[ -]?\d{3}\b";
static MOBILE: Lazy<Regex> = Lazy::new(|| Regex::new(MOBILE_EXPR).expect("valid regex"));

const MOBILE_INTL_EXPR: &str = r"\+61[ -]?4\d{2}[ -]?\d{3}[ -]?\d{3}\b";
static MOBILE_INTL: Lazy<Regex> = Lazy::new(|| Regex::new(MOBILE_INTL_EXPR).expect("valid regex"));

const LANDLINE_EXPR: &str = r"\b0[2378][ -]?\d{4}[ -]?\d{4}\b";
static LANDLINE: Lazy<Regex> = Lazy::new(|| Regex::new(LANDLINE_EXPR).expect("valid regex"));

const LANDLINE_PAREN_EXPR: &str = r"\(0[2378]\)[ -]?\d{4}[ -]?\d{4}\b";
static LANDLINE_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(LANDLINE_PAREN_EXPR).expect("valid regex"));

const LANDLINE_INTL_EXPR: &str = r"\+61[ -]?[2378][ -]?\d{4}[ -]?\d{4}\b";
static LANDLINE_INTL: Lazy<Regex> =
    Lazy::new(|| Regex::new(LANDLINE_INTL_EXPR).expect("valid regex"));

fn specs(ty: &IdentifierType) -> &'static [PatternSpec] {
    static ABN_SPECS: [PatternSpec; 1] = [PatternSpec {
        name: "abn",
        expr: ABN_EXPR,
        regex: &ABN,
        strength: Strength::Strong,
    }];
    static ACN_SPECS: [PatternSpec; 1] = [PatternSpec {
        name: "acn",
        expr: NINE_DIGIT_EXPR,
        regex: &NINE_DIGIT,
        strength: Strength::Strong,
    }];
    static TFN_SPECS: [PatternSpec; 2] = [
        PatternSpec {
            name: "tfn_9",
            expr: NINE_DIGIT_EXPR,
            regex: &NINE_DIGIT,
            strength: Strength::Strong,
        },
        PatternSpec {
            name: "tfn_8",
            expr: TFN_8_EXPR,
            regex: &TFN_8,
            strength: Strength::Medium,
        },
    ];
    static MEDICARE_SPECS: [PatternSpec; 1] = [PatternSpec {
        name: "medicare_card",
        expr: MEDICARE_EXPR,
        regex: &MEDICARE,
        strength: Strength::Strong,
    }];
    static PROVIDER_SPECS: [PatternSpec; 1] = [PatternSpec {
        name: "medicare_provider",
        expr: PROVIDER_EXPR,
        regex: &PROVIDER,
        strength: Strength::Strong,
    }];
    static DVA_SPECS: [PatternSpec; 1] = [PatternSpec {
        name: "dva_file_number",
        expr: DVA_EXPR,
        regex: &DVA,
        strength: Strength::Strong,
    }];
    static CRN_SPECS: [PatternSpec; 1] = [PatternSpec {
        name: "crn",
        expr: CRN_EXPR,
        regex: &CRN,
        strength: Strength::Strong,
    }];
    static PASSPORT_SPECS: [PatternSpec; 1] = [PatternSpec {
        name: "passport",
        expr: PASSPORT_EXPR,
        regex: &PASSPORT,
        strength: Strength::Strong,
    }];
    static LICENCE_SPECS: [PatternSpec; 1] = [PatternSpec {
        name: "drivers_licence",
        expr: LICENCE_EXPR,
        regex: &LICENCE,
        strength: Strength::Medium,
    }];
    static MOBILE_SPECS: [PatternSpec; 2] = [
        PatternSpec {
            name: "mobile",
            expr: MOBILE_EXPR,
            regex: &MOBILE,
            strength: Strength::Strong,
        },
        PatternSpec {
            name: "mobile_intl",
            expr: MOBILE_INTL_EXPR,
            regex: &MOBILE_INTL,
            strength: Strength::Strong,
        },
    ];
    static LANDLINE_SPECS: [PatternSpec; 3] = [
        PatternSpec {
            name: "landline",
            expr: LANDLINE_EXPR,
            regex: &LANDLINE,
            strength: Strength::Medium,
        },
        PatternSpec {
            name: "landline_paren",
            expr: LANDLINE_PAREN_EXPR,
            regex: &LANDLINE_PAREN,
            strength: Strength::Medium,
        },
        PatternSpec {
            name: "landline_intl",
            expr: LANDLINE_INTL_EXPR,
            regex: &LANDLINE_INTL,
            strength: Strength::Medium,
        },
    ];

    match ty {
        IdentifierType::Abn => &ABN_SPECS,
        IdentifierType::Acn => &ACN_SPECS,
        IdentifierType::Tfn => &TFN_SPECS,
        IdentifierType::Medicare => &MEDICARE_SPECS,
        IdentifierType::MedicareProvider => &PROVIDER_SPECS,
        IdentifierType::DvaFileNumber => &DVA_SPECS,
        IdentifierType::Crn => &CRN_SPECS,
        IdentifierType::Passport => &PASSPORT_SPECS,
        IdentifierType::DriversLicence => &LICENCE_SPECS,
        IdentifierType::MobilePhone => &MOBILE_SPECS,
        IdentifierType::LandlinePhone => &LANDLINE_SPECS,
        IdentifierType::Generic(_) => &[],
    }
}

/// Extract all candidate spans for one identifier type.
///
/// Does not deduplicate or resolve overlaps, and never mutates the input.
/// Generic (externally supplied) types have no patterns and yield nothing.
#[must_use]
pub fn extract(text: &str, ty: &IdentifierType) -> Vec<Candidate> {
    let mut out = Vec::new();
    for spec in specs(ty) {
        for m in spec.regex.find_iter(text) {
            out.push(Candidate {
                identifier_type: ty.clone(),
                start: m.start(),
                end: m.end(),
                text: m.as_str().to_string(),
                pattern_name: spec.name,
                pattern: spec.expr,
                strength: spec.strength,
            });
        }
    }
    out
}
