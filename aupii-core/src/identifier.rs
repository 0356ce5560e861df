//! The closed set of identifier types this system detects.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Type of a detected identifier.
///
/// The eleven custom variants are the Australian structured identifiers with
/// dedicated pattern/validator support. [`IdentifierType::Generic`] carries
/// categories supplied by an external statistical NER engine (PERSON,
/// EMAIL_ADDRESS, ...) that the registry merges into the same result set.
///
/// Serializes as the stable tag string (`"AU_ABN"`, `"PERSON"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentifierType {
    /// Australian Business Number: 11 digits, weighted mod-89 checksum.
    Abn,
    /// Australian Company Number: 9 digits, complement check digit.
    Acn,
    /// Tax File Number: 8 or 9 digits, weighted mod-11 checksum.
    Tfn,
    /// Medicare card number: 10 digits, the last being the card-issue digit.
    Medicare,
    /// Medicare provider number: 6-digit stem + location character + check letter.
    MedicareProvider,
    /// DVA (Department of Veterans' Affairs) file number.
    DvaFileNumber,
    /// Centrelink Customer Reference Number.
    Crn,
    /// Australian passport number: 1-2 letters (excluding O/S/Q/I) + 7 digits.
    Passport,
    /// Driver's licence number (state-specific numeric/alphanumeric shapes).
    DriversLicence,
    /// Australian mobile phone number (04xx).
    MobilePhone,
    /// Australian landline phone number (02/03/07/08 area codes).
    LandlinePhone,
    /// A category supplied by an external NER engine (e.g. "PERSON").
    Generic(String),
}

impl IdentifierType {
    /// All custom identifier types, in registration order.
    ///
    /// Registration order is the final tie-breaker for equal-start findings,
    /// so this list is part of the output contract.
    pub const CUSTOM: [IdentifierType; 11] = [
        IdentifierType::Abn,
        IdentifierType::Acn,
        IdentifierType::Tfn,
        IdentifierType::Medicare,
        IdentifierType::MedicareProvider,
        IdentifierType::DvaFileNumber,
        IdentifierType::Crn,
        IdentifierType::Passport,
        IdentifierType::DriversLicence,
        IdentifierType::MobilePhone,
        IdentifierType::LandlinePhone,
    ];

    /// Stable string form, used for serialization and display.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            IdentifierType::Abn => "AU_ABN",
            IdentifierType::Acn => "AU_ACN",
            IdentifierType::Tfn => "AU_TFN",
            IdentifierType::Medicare => "AU_MEDICARE",
            IdentifierType::MedicareProvider => "AU_MEDICAREPROVIDER",
            IdentifierType::DvaFileNumber => "AU_DVA",
            IdentifierType::Crn => "AU_CRN",
            IdentifierType::Passport => "AU_PASSPORT",
            IdentifierType::DriversLicence => "AU_DRIVERSLICENSE",
            IdentifierType::MobilePhone => "AU_PHONE_MOBILE",
            IdentifierType::LandlinePhone => "AU_PHONE_LANDLINE",
            IdentifierType::Generic(name) => name,
        }
    }

    /// Parse a custom identifier tag, returning `None` for unknown names.
    ///
    /// Only the eleven custom tags parse; generic categories are constructed
    /// explicitly by the caller that owns them.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        IdentifierType::CUSTOM
            .iter()
            .find(|ty| ty.as_str() == tag)
            .cloned()
    }

    /// Returns true for the custom (pattern + validator) identifier types.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        !matches!(self, IdentifierType::Generic(_))
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for IdentifierType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IdentifierType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(IdentifierType::from_tag(&tag).unwrap_or(IdentifierType::Generic(tag)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_custom_tags() {
        for ty in IdentifierType::CUSTOM {
            assert_eq!(IdentifierType::from_tag(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn unknown_tag_rejected() {
        assert_eq!(IdentifierType::from_tag("AU_UNKNOWN"), None);
        assert_eq!(IdentifierType::from_tag(""), None);
    }

    #[test]
    fn generic_displays_raw_name() {
        let ty = IdentifierType::Generic("PERSON".to_string());
        assert_eq!(ty.as_str(), "PERSON");
        assert!(!ty.is_custom());
    }

    #[test]
    fn serde_uses_tag_strings() {
        let json = serde_json::to_string(&IdentifierType::Abn).unwrap();
        assert_eq!(json, "\"AU_ABN\"");
        let back: IdentifierType = serde_json::from_str("\"AU_ABN\"").unwrap();
        assert_eq!(back, IdentifierType::Abn);
        let generic: IdentifierType = serde_json::from_str("\"PERSON\"").unwrap();
        assert_eq!(generic, IdentifierType::Generic("PERSON".to_string()));
    }

    #[test]
    fn custom_list_has_no_duplicates() {
        let mut tags: Vec<&str> = IdentifierType::CUSTOM.iter().map(|t| t.as_str()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), IdentifierType::CUSTOM.len());
    }
}
