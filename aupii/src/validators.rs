//! Structural validators - per-type checksum, lookup-table, and digit-class
//! checks.
//!
//! Every validator is a pure, total function: any string claiming to be a
//! given identifier type produces either `Valid` or `Invalid` with a reason.
//! Wrong length or stray characters yield `Invalid`, never a panic or error.
//! Separators (spaces, hyphens, parentheses) are stripped before checking.

use aupii_core::{IdentifierType, ValidationOutcome};

/// Validate a candidate's internal consistency for the given type.
///
/// Phone numbers and generic (externally supplied) categories are purely
/// structural: the pattern already encodes every constraint, so anything the
/// extractor matched is `Valid`.
#[must_use]
pub fn validate(ty: &IdentifierType, text: &str) -> ValidationOutcome {
    match ty {
        IdentifierType::Abn => validate_abn(text),
        IdentifierType::Acn => validate_acn(text),
        IdentifierType::Tfn => validate_tfn(text),
        IdentifierType::Medicare => validate_medicare(text),
        IdentifierType::MedicareProvider => validate_medicare_provider(text),
        IdentifierType::DvaFileNumber => validate_dva(text),
        IdentifierType::Crn => validate_crn(text),
        IdentifierType::Passport => validate_passport(text),
        IdentifierType::DriversLicence => validate_drivers_licence(text),
        IdentifierType::MobilePhone
        | IdentifierType::LandlinePhone
        | IdentifierType::Generic(_) => ValidationOutcome::Valid,
    }
}

fn strip_separators(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

fn digits(text: &str) -> Option<Vec<u32>> {
    text.chars().map(|c| c.to_digit(10)).collect()
}

const ABN_WEIGHTS: [i64; 11] = [10, 1, 3, 5, 7, 9, 11, 13, 15, 17, 19];

/// ABN check: subtract 1 from the first digit, apply the published weights,
/// and require the weighted sum to be divisible by 89.
fn validate_abn(text: &str) -> ValidationOutcome {
    let clean = strip_separators(text);
    let Some(ds) = digits(&clean) else {
        return ValidationOutcome::invalid("non-digit character");
    };
    if ds.len() != 11 {
        return ValidationOutcome::invalid("expected 11 digits");
    }
    let sum: i64 = ds
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let d = i64::from(d) - i64::from(i == 0);
            d * ABN_WEIGHTS[i]
        })
        .sum();
    if sum.rem_euclid(89) == 0 {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid("checksum mismatch")
    }
}

const ACN_WEIGHTS: [u32; 8] = [8, 7, 6, 5, 4, 3, 2, 1];

/// ACN check: weighted sum over the first 8 digits; the complement
/// `(10 - sum % 10) % 10` must equal the 9th digit.
fn validate_acn(text: &str) -> ValidationOutcome {
    let clean = strip_separators(text);
    let Some(ds) = digits(&clean) else {
        return ValidationOutcome::invalid("non-digit character");
    };
    if ds.len() != 9 {
        return ValidationOutcome::invalid("expected 9 digits");
    }
    let sum: u32 = ds.iter().zip(ACN_WEIGHTS).map(|(&d, w)| d * w).sum();
    if (10 - sum % 10) % 10 == ds[8] {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid("check digit mismatch")
    }
}

const TFN_WEIGHTS: [u32; 9] = [1, 4, 3, 7, 5, 8, 6, 9, 10];

/// TFN check: weights zipped over the 8 or 9 digits; the weighted sum must
/// be divisible by 11.
fn validate_tfn(text: &str) -> ValidationOutcome {
    let clean = strip_separators(text);
    let Some(ds) = digits(&clean) else {
        return ValidationOutcome::invalid("non-digit character");
    };
    if ds.len() != 8 && ds.len() != 9 {
        return ValidationOutcome::invalid("expected 8 or 9 digits");
    }
    let sum: u32 = ds.iter().zip(TFN_WEIGHTS).map(|(&d, w)| d * w).sum();
    if sum % 11 == 0 {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid("checksum mismatch")
    }
}

const MEDICARE_WEIGHTS: [u32; 8] = [1, 3, 7, 9, 1, 3, 7, 9];

/// Medicare card check: first digit in 2-6; weighted sum over the first 8
/// digits mod 10 must equal the 9th. The 10th (card-issue) digit is not
/// checked.
fn validate_medicare(text: &str) -> ValidationOutcome {
    let clean = strip_separators(text);
    let Some(ds) = digits(&clean) else {
        return ValidationOutcome::invalid("non-digit character");
    };
    if ds.len() != 10 {
        return ValidationOutcome::invalid("expected 10 digits");
    }
    if !(2..=6).contains(&ds[0]) {
        return ValidationOutcome::invalid("first digit must be 2-6");
    }
    let sum: u32 = ds.iter().zip(MEDICARE_WEIGHTS).map(|(&d, w)| d * w).sum();
    if sum % 10 == ds[8] {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid("check digit mismatch")
    }
}

// Practice-location characters: digits plus A-Y excluding I, O, S, Z.
const PROVIDER_LOCATION_CHARS: &str = "0123456789ABCDEFGHJKLMNPQRTUVWXY";
const PROVIDER_LOCATION_LETTERS: &str = "ABCDEFGHJKLMNPQRTUVWXY";
const PROVIDER_STEM_WEIGHTS: [u32; 6] = [3, 5, 8, 4, 2, 1];
const PROVIDER_CHECK_LETTERS: [char; 11] = ['Y', 'X', 'W', 'T', 'L', 'K', 'J', 'H', 'F', 'B', 'A'];

/// Medicare provider check: 6-digit stem, practice-location character, and a
/// check letter recomputed from the weighted stem plus six times the
/// location's numeric value, mod 11.
fn validate_medicare_provider(text: &str) -> ValidationOutcome {
    let chars: Vec<char> = text.to_uppercase().chars().collect();
    if chars.len() != 8 {
        return ValidationOutcome::invalid("expected 8 characters");
    }
    let Some(stem) = chars[..6].iter().map(|c| c.to_digit(10)).collect::<Option<Vec<u32>>>()
    else {
        return ValidationOutcome::invalid("provider stem must be 6 digits");
    };
    let location = chars[6];
    if !PROVIDER_LOCATION_CHARS.contains(location) {
        return ValidationOutcome::invalid("unknown practice-location character");
    }
    let plv = match location.to_digit(10) {
        Some(d) => d,
        None => {
            // A..Y (excluding I, O, S, Z) map to 10..31.
            let idx = PROVIDER_LOCATION_LETTERS
                .chars()
                .position(|c| c == location)
                .unwrap_or(0) as u32;
            10 + idx
        }
    };
    let total: u32 = stem
        .iter()
        .zip(PROVIDER_STEM_WEIGHTS)
        .map(|(&d, w)| d * w)
        .sum::<u32>()
        + plv * 6;
    let expected = PROVIDER_CHECK_LETTERS[(total % 11) as usize];
    if chars[7] == expected {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid("check letter mismatch")
    }
}

const DVA_STATE_CODES: &str = "NVQWST";

/// DVA file number check: state letter, war code (1-3 letters or a leading
/// space) followed by a digit run whose maximum length shrinks as the war
/// code grows, and an optional trailing dependant letter.
fn validate_dva(text: &str) -> ValidationOutcome {
    let chars: Vec<char> = text.to_uppercase().chars().collect();
    let n = chars.len();
    if !(3..=9).contains(&n) {
        return ValidationOutcome::invalid("expected 3 to 9 characters");
    }
    if !DVA_STATE_CODES.contains(chars[0]) {
        return ValidationOutcome::invalid("unknown state code");
    }
    if n == 9 && !chars[8].is_ascii_alphabetic() {
        return ValidationOutcome::invalid("dependant code must be a letter");
    }
    if !(chars[1].is_ascii_alphabetic() || chars[1] == ' ') {
        return ValidationOutcome::invalid("war code must start with a letter or space");
    }
    if !chars[1..].iter().any(|c| c.is_ascii_digit()) {
        return ValidationOutcome::invalid("no digits present");
    }

    let mut work: &[char] = &chars[1..];
    // Strip a dependant letter only when digits precede it.
    let has_dependant = work.last().is_some_and(|c| c.is_ascii_alphabetic()) && n > 3;
    if has_dependant && work[..work.len() - 1].iter().any(|c| c.is_ascii_digit()) {
        work = &work[..work.len() - 1];
    }
    if work.is_empty() {
        return ValidationOutcome::invalid("missing war code");
    }

    let mut war_len = 0;
    for &c in work {
        if c.is_ascii_alphabetic() {
            war_len += 1;
        } else if c == ' ' && war_len == 0 {
            war_len = 1;
            break;
        } else {
            break;
        }
    }
    let rest = &work[war_len..];
    if rest.is_empty() || !rest.iter().all(|c| c.is_ascii_digit()) {
        return ValidationOutcome::invalid("war code must be followed by digits");
    }
    let max_digits = match war_len {
        1 => 6,
        2 => 5,
        3 => 4,
        _ => return ValidationOutcome::invalid("war code too long"),
    };
    if rest.len() <= max_digits {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid("digit run too long for war code")
    }
}

const CRN_STATE_CODES: &str = "234567";
const CRN_CHECK_LETTERS: &str = "ABCHJKLSTVX";
// Indexed by remainder mod 11: 0 -> X, 1 -> V, ..., 10 -> A.
const CRN_REMAINDER_LETTERS: [char; 11] = ['X', 'V', 'T', 'S', 'L', 'K', 'J', 'H', 'C', 'B', 'A'];

/// CRN check: state digit in 2-7, 8 digits, and a check letter recomputed
/// from the 9 leading digits weighted by powers of two. A trailing dependant
/// indicator, if present, is informational only.
fn validate_crn(text: &str) -> ValidationOutcome {
    let clean: Vec<char> = strip_separators(text).to_uppercase().chars().collect();
    if !(10..=11).contains(&clean.len()) {
        return ValidationOutcome::invalid("expected 10 or 11 characters");
    }
    if !CRN_STATE_CODES.contains(clean[0]) {
        return ValidationOutcome::invalid("unknown state code");
    }
    let Some(lead) = clean[..9].iter().map(|c| c.to_digit(10)).collect::<Option<Vec<u32>>>()
    else {
        return ValidationOutcome::invalid("non-digit character");
    };
    if !CRN_CHECK_LETTERS.contains(clean[9]) {
        return ValidationOutcome::invalid("unknown check letter");
    }
    if clean.len() == 11 && !clean[10].is_ascii_alphabetic() {
        return ValidationOutcome::invalid("dependant indicator must be a letter");
    }
    // Weight is 2^(10 - position) over 1-based positions 1..=9.
    let total: u32 = lead
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (1u32 << (9 - i)))
        .sum();
    let expected = CRN_REMAINDER_LETTERS[(total % 11) as usize];
    if clean[9] == expected {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid("check letter mismatch")
    }
}

// Passport letters exclude O, S, Q, and I.
const PASSPORT_LETTERS: &str = "ABCDEFGHJKLMNPRTUVWXYZ";

/// Passport check: 1-2 letters from the allowed set, then exactly 7 digits.
fn validate_passport(text: &str) -> ValidationOutcome {
    let chars: Vec<char> = text.to_uppercase().chars().collect();
    if !(8..=9).contains(&chars.len()) {
        return ValidationOutcome::invalid("expected 8 or 9 characters");
    }
    let letter_count = chars.len() - 7;
    for &c in &chars[..letter_count] {
        if !PASSPORT_LETTERS.contains(c) {
            return ValidationOutcome::invalid("disallowed letter");
        }
    }
    if chars[letter_count..].iter().all(|c| c.is_ascii_digit()) {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid("expected 7 digits after the letters")
    }
}

/// Driver's licence check: 6-10 digits that are not trivially uniform, or one
/// of the six-character alphanumeric shapes (1 letter + 5 digits, 2 letters +
/// 4 digits, 4 digits + 2 letters).
fn validate_drivers_licence(text: &str) -> ValidationOutcome {
    let clean: Vec<char> = strip_separators(text).to_uppercase().chars().collect();
    if !(6..=10).contains(&clean.len()) {
        return ValidationOutcome::invalid("expected 6 to 10 characters");
    }
    if let Some(ds) = clean.iter().map(|c| c.to_digit(10)).collect::<Option<Vec<u32>>>() {
        if too_uniform(&ds) {
            return ValidationOutcome::invalid("digit sequence too uniform");
        }
        return ValidationOutcome::Valid;
    }
    if clean.len() == 6 {
        let letter_then_digits = clean[0].is_ascii_alphabetic()
            && clean[1..].iter().all(|c| c.is_ascii_digit());
        let two_letters_four_digits = clean[..2].iter().all(|c| c.is_ascii_alphabetic())
            && clean[2..].iter().all(|c| c.is_ascii_digit());
        let four_digits_two_letters = clean[..4].iter().all(|c| c.is_ascii_digit())
            && clean[4..].iter().all(|c| c.is_ascii_alphabetic());
        if letter_then_digits || two_letters_four_digits || four_digits_two_letters {
            return ValidationOutcome::Valid;
        }
    }
    ValidationOutcome::invalid("unrecognized licence shape")
}

fn too_uniform(ds: &[u32]) -> bool {
    let mut counts = [0usize; 10];
    for &d in ds {
        counts[d as usize] += 1;
    }
    let unique = counts.iter().filter(|&&c| c > 0).count();
    if unique == 1 {
        return true;
    }
    // Short numbers reject perfect ascending/descending runs.
    if ds.len() <= 7 {
        let ascending = ds.windows(2).all(|w| w[1] as i64 == w[0] as i64 + 1);
        let descending = ds.windows(2).all(|w| w[1] as i64 == w[0] as i64 - 1);
        if ascending || descending {
            return true;
        }
    }
    // Longer numbers only reject near-constant sequences.
    if ds.len() >= 8 && unique <= 2 {
        let max_count = *counts.iter().max().unwrap_or(&0);
        if max_count * 10 > ds.len() * 8 {
            return true;
        }
    }
    false
}
