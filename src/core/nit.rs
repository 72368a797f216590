use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weights used for the Colombian NIT check digit (DV), applied right-aligned.
const DV_WEIGHTS: [u32; 15] = [71, 67, 59, 53, 47, 43, 41, 37, 29, 23, 19, 17, 13, 7, 3];

/// Minimum and maximum digit counts accepted for a NIT (after normalization).
pub const MIN_NIT_DIGITS: usize = 8;
pub const MAX_NIT_DIGITS: usize = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NitError {
    #[error("NIT is empty")]
    Empty,

    #[error("NIT contains no digits: '{0}'")]
    NonNumeric(String),

    #[error("NIT must have {MIN_NIT_DIGITS}-{MAX_NIT_DIGITS} digits, found {digits} in '{raw}'")]
    BadLength { raw: String, digits: usize },

    #[error("NIT '{raw}' has check digit {given}, expected {expected}")]
    CheckDigitMismatch { raw: String, given: u32, expected: u32 },
}

/// A tax identifier (NIT) used as the join key between spreadsheet rows and
/// receipt filenames.
///
/// Holds both the raw string as it appeared in the source and the normalized
/// digit string used for comparison. Normalization drops everything after the
/// first hyphen (the check digit, "DV") and strips any remaining non-digit
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nit {
    raw: String,
    digits: String,
}

impl Nit {
    /// Parse and normalize a NIT from user input.
    ///
    /// # Errors
    ///
    /// Returns `NitError::Empty` for blank input, `NitError::NonNumeric` when
    /// nothing numeric remains after normalization, and `NitError::BadLength`
    /// when the digit count falls outside 8-10.
    pub fn parse(raw: &str) -> Result<Self, NitError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NitError::Empty);
        }

        let digits = normalize(trimmed);
        if digits.is_empty() {
            return Err(NitError::NonNumeric(trimmed.to_string()));
        }
        if !(MIN_NIT_DIGITS..=MAX_NIT_DIGITS).contains(&digits.len()) {
            return Err(NitError::BadLength {
                raw: trimmed.to_string(),
                digits: digits.len(),
            });
        }

        Ok(Self {
            raw: trimmed.to_string(),
            digits,
        })
    }

    /// Parse a NIT and, when the input carries a `-dv` suffix, verify the
    /// check digit against the computed value.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Nit::parse`] plus `NitError::CheckDigitMismatch`
    /// when a declared check digit does not match the computed one.
    pub fn parse_checked(raw: &str) -> Result<Self, NitError> {
        let nit = Self::parse(raw)?;

        if let Some((_, dv)) = nit.raw.split_once('-') {
            if let Ok(given) = dv.trim().parse::<u32>() {
                let expected = check_digit(&nit.digits);
                if given != expected {
                    return Err(NitError::CheckDigitMismatch {
                        raw: nit.raw,
                        given,
                        expected,
                    });
                }
            }
        }

        Ok(nit)
    }

    /// The normalized digit string (check digit stripped).
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// The NIT as it appeared in the source.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Keys under which this NIT should be looked up with formatting
    /// tolerance. A 10-digit NIT may carry an embedded check digit, so its
    /// first 9 digits are also a valid key ("mirror key").
    #[must_use]
    pub fn mirror_keys(&self) -> Vec<String> {
        let mut keys = vec![self.digits.clone()];
        if self.digits.len() == MAX_NIT_DIGITS {
            keys.push(self.digits[..MAX_NIT_DIGITS - 1].to_string());
        }
        keys
    }
}

impl std::fmt::Display for Nit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digits)
    }
}

/// Normalize a NIT string to bare digits: the part after the first hyphen is
/// assumed to be the check digit and dropped, every other non-digit character
/// is stripped.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let head = raw.split('-').next().unwrap_or(raw);
    head.chars().filter(char::is_ascii_digit).collect()
}

/// Compute the check digit (DV) for a NIT digit string using the standard
/// mod-11 weighted sum.
#[must_use]
pub fn check_digit(digits: &str) -> u32 {
    let weights = &DV_WEIGHTS[DV_WEIGHTS.len().saturating_sub(digits.len())..];
    let sum: u32 = digits
        .chars()
        .zip(weights)
        .map(|(d, w)| d.to_digit(10).unwrap_or(0) * w)
        .sum();

    let rem = sum % 11;
    if rem < 2 {
        rem
    } else {
        11 - rem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_digits() {
        let nit = Nit::parse("900123456").unwrap();
        assert_eq!(nit.digits(), "900123456");
        assert_eq!(nit.raw(), "900123456");
    }

    #[test]
    fn test_parse_strips_check_digit_after_hyphen() {
        let nit = Nit::parse("900123456-7").unwrap();
        assert_eq!(nit.digits(), "900123456");
    }

    #[test]
    fn test_parse_strips_punctuation() {
        let nit = Nit::parse(" 900.123.456 ").unwrap();
        assert_eq!(nit.digits(), "900123456");
    }

    #[test]
    fn test_parse_rejects_empty_and_non_numeric() {
        assert_eq!(Nit::parse(""), Err(NitError::Empty));
        assert_eq!(Nit::parse("   "), Err(NitError::Empty));
        assert!(matches!(Nit::parse("abc"), Err(NitError::NonNumeric(_))));
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert!(matches!(
            Nit::parse("1234567"),
            Err(NitError::BadLength { digits: 7, .. })
        ));
        assert!(matches!(
            Nit::parse("12345678901"),
            Err(NitError::BadLength { digits: 11, .. })
        ));
    }

    #[test]
    fn test_mirror_keys() {
        let nine = Nit::parse("123456789").unwrap();
        assert_eq!(nine.mirror_keys(), vec!["123456789"]);

        let ten = Nit::parse("1234567890").unwrap();
        assert_eq!(ten.mirror_keys(), vec!["1234567890", "123456789"]);
    }

    #[test]
    fn test_check_digit_is_stable() {
        let dv = check_digit("900123456");
        assert!(dv <= 9);
        assert_eq!(dv, check_digit("900123456"));
    }

    #[test]
    fn test_parse_checked_accepts_matching_dv() {
        let digits = "900123456";
        let dv = check_digit(digits);
        let nit = Nit::parse_checked(&format!("{digits}-{dv}")).unwrap();
        assert_eq!(nit.digits(), digits);
    }

    #[test]
    fn test_parse_checked_rejects_wrong_dv() {
        let digits = "900123456";
        let wrong = (check_digit(digits) + 1) % 10;
        assert!(matches!(
            Nit::parse_checked(&format!("{digits}-{wrong}")),
            Err(NitError::CheckDigitMismatch { .. })
        ));
    }
}
