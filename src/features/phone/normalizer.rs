//! # Feature: Phone Number Normalization
//!
//! Parses region-local numbers into E.164 and validates them against the
//! numbering plan of the resolved region. Pure; no I/O.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Default region lifted into configuration
//! - 1.0.0: Initial release, GB only

use anyhow::{anyhow, Result};
use phonenumber::{country, Mode, PhoneNumber};
use serde::{Deserialize, Serialize};

use crate::core::InvalidPhoneNumber;

/// Phone number in E.164 form: `+<country code><national number>`, no separators
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct E164(String);

impl E164 {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for E164 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for E164 {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhoneNumberNormalizer {
    region: country::Id,
}

impl PhoneNumberNormalizer {
    /// `region` is an ISO 3166-1 alpha-2 code such as `"GB"`
    pub fn new(region: &str) -> Result<Self> {
        let code = region.trim().to_uppercase();
        let region = code
            .parse::<country::Id>()
            .map_err(|_| anyhow!("Unknown phone region: {}", code))?;
        Ok(Self { region })
    }

    fn parse_valid(&self, raw: &str) -> Result<PhoneNumber, InvalidPhoneNumber> {
        let number = phonenumber::parse(Some(self.region), raw.trim())
            .map_err(|_| InvalidPhoneNumber::new(raw))?;
        if !phonenumber::is_valid(&number) {
            return Err(InvalidPhoneNumber::new(raw));
        }
        Ok(number)
    }

    /// Canonical E.164 form of `raw`, or the untouched input on failure
    pub fn normalize(&self, raw: &str) -> Result<E164, InvalidPhoneNumber> {
        let number = self.parse_valid(raw)?;
        Ok(E164(number.format().mode(Mode::E164).to_string()))
    }

    /// Digits of the national format, e.g. `07773333888` for `+447773333888`.
    ///
    /// This is how numbers are typed into the tracking sheet, and the sheet
    /// search only matches the full cell text.
    pub fn national_search_key(&self, phone: &str) -> Result<String, InvalidPhoneNumber> {
        let number = self.parse_valid(phone)?;
        Ok(number
            .format()
            .mode(Mode::National)
            .to_string()
            .chars()
            .filter(char::is_ascii_digit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gb() -> PhoneNumberNormalizer {
        PhoneNumberNormalizer::new("GB").unwrap()
    }

    #[test]
    fn test_normalize_gb_mobile() {
        assert_eq!(gb().normalize("07773333888").unwrap().as_str(), "+447773333888");
    }

    #[test]
    fn test_normalize_strips_separators() {
        let n = gb();
        for raw in ["07773 333888", "0777-333-3888", " (07773) 333 888 ", "+44 7773 333888"] {
            assert_eq!(n.normalize(raw).unwrap().as_str(), "+447773333888", "{raw}");
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = gb();
        for raw in ["07773333888", "07912 345678", "020 7946 0000", "07400123456"] {
            let once = n.normalize(raw).unwrap();
            assert!(once.as_str().starts_with('+'));
            assert!(once.as_str()[1..].chars().all(|c| c.is_ascii_digit()));
            let twice = n.normalize(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_invalid_numbers_keep_raw_input() {
        let n = gb();
        for raw in ["123", "", "not a number", "0777333388812345", "None"] {
            assert_eq!(n.normalize(raw), Err(InvalidPhoneNumber::new(raw)), "{raw}");
        }
    }

    #[test]
    fn test_other_region() {
        let ie = PhoneNumberNormalizer::new("ie").unwrap();
        assert_eq!(ie.normalize("087 123 4567").unwrap().as_str(), "+353871234567");
        // GB numbers with an explicit country code resolve regardless of default region
        assert_eq!(ie.normalize("+447773333888").unwrap().as_str(), "+447773333888");
    }

    #[test]
    fn test_unknown_region() {
        assert!(PhoneNumberNormalizer::new("XX").is_err());
    }

    #[test]
    fn test_national_search_key() {
        let n = gb();
        assert_eq!(n.national_search_key("+447773333888").unwrap(), "07773333888");
        assert_eq!(n.national_search_key("+442079460000").unwrap(), "02079460000");
        assert!(n.national_search_key("+44123").is_err());
    }
}
