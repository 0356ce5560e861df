//! Witness type for f64 confidence scores bounded to [0.0, 1.0].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A confidence score guaranteed to be in the range [0.0, 1.0].
///
/// This is a "witness type" - its existence proves the value is valid.
/// Once you have a `Confidence`, you never need to check bounds again.
///
/// # Construction
///
/// - [`Confidence::new`]: Returns `None` if out of range (strict)
/// - [`Confidence::saturating`]: Clamps to [0, 1] (lenient, never fails)
///
/// # Zero-Cost Abstraction
///
/// `Confidence` is `#[repr(transparent)]`, meaning it has the exact same
/// memory layout as `f64`. There is no runtime overhead.
///
/// # Example
///
/// ```rust
/// use aupii_core::Confidence;
///
/// // Strict: fail on invalid input
/// assert!(Confidence::new(0.5).is_some());
/// assert!(Confidence::new(1.5).is_none());
///
/// // Lenient: clamp to valid range
/// let conf = Confidence::saturating(1.5);
/// assert_eq!(conf.get(), 1.0);
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// The minimum valid confidence value.
    pub const MIN: Self = Self(0.0);

    /// The maximum valid confidence value.
    pub const MAX: Self = Self(1.0);

    /// A "certain" confidence of 1.0 (deny-list injections use this).
    pub const CERTAIN: Self = Self(1.0);

    /// Create a confidence score, returning `None` if out of range.
    #[must_use]
    #[inline]
    pub fn new(value: f64) -> Option<Self> {
        if (0.0..=1.0).contains(&value) && !value.is_nan() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a confidence score, clamping to [0.0, 1.0].
    ///
    /// NaN is treated as 0.0.
    #[must_use]
    #[inline]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Get the inner value (guaranteed to be in [0.0, 1.0]).
    #[must_use]
    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Check if this is "high confidence" (>= 0.9).
    #[must_use]
    #[inline]
    pub fn is_high(self) -> bool {
        self.0 >= 0.9
    }

    /// Check if this passes a threshold.
    #[must_use]
    #[inline]
    pub fn passes(self, threshold: f64) -> bool {
        self.0 >= threshold
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::MAX
    }
}

impl fmt::Debug for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Confidence({:.4})", self.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

impl From<Confidence> for f64 {
    #[inline]
    fn from(conf: Confidence) -> Self {
        conf.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        assert!(Confidence::new(0.0).is_some());
        assert!(Confidence::new(0.5).is_some());
        assert!(Confidence::new(1.0).is_some());
    }

    #[test]
    fn new_invalid() {
        assert!(Confidence::new(-0.1).is_none());
        assert!(Confidence::new(1.1).is_none());
        assert!(Confidence::new(f64::NAN).is_none());
    }

    #[test]
    fn saturating_clamps() {
        assert_eq!(Confidence::saturating(0.5).get(), 0.5);
        assert_eq!(Confidence::saturating(-1.0).get(), 0.0);
        assert_eq!(Confidence::saturating(2.0).get(), 1.0);
        assert_eq!(Confidence::saturating(f64::NAN).get(), 0.0);
    }

    #[test]
    fn predicates() {
        assert!(Confidence::new(0.95).unwrap().is_high());
        assert!(!Confidence::new(0.85).unwrap().is_high());
        assert!(Confidence::new(0.7).unwrap().passes(0.5));
        assert!(!Confidence::new(0.4).unwrap().passes(0.5));
    }

    #[test]
    fn display_format() {
        let conf = Confidence::new(0.856).unwrap();
        assert_eq!(format!("{}", conf), "85.6%");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn saturating_is_always_in_bounds(value in proptest::num::f64::ANY) {
                let conf = Confidence::saturating(value);
                prop_assert!((0.0..=1.0).contains(&conf.get()));
            }

            #[test]
            fn new_agrees_with_saturating_inside_range(value in 0.0f64..=1.0) {
                prop_assert_eq!(
                    Confidence::new(value).map(Confidence::get),
                    Some(Confidence::saturating(value).get())
                );
            }
        }
    }
}
