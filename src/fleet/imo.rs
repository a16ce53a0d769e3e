use crate::Result;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::bail;
use serde::{Deserialize, Serialize};

/// A validated IMO ship identification number.
///
/// Seven digits, the last of which is a check digit: the first six digits,
/// weighted 7 down to 2 and summed, must equal the check digit modulo 10.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImoNumber(Box<str>);

impl ImoNumber {
    /// Parse and validate an IMO number from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly seven digits or the
    /// check digit does not match.
    pub fn parse(input: &str) -> Result<Self> {
        let digits = input.trim();

        if digits.len() != 7 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            bail!("invalid IMO number (expected 7 digits): {input}");
        }

        let values: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();
        let checksum: u32 = values[..6].iter().zip((2..=7).rev()).map(|(digit, weight)| digit * weight).sum();

        if checksum % 10 != values[6] {
            bail!("invalid IMO number (check digit mismatch): {input}");
        }

        Ok(Self(Box::from(digits)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ImoNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ImoNumber {
    type Err = ohno::AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert_eq!(ImoNumber::parse("9876543").unwrap().as_str(), "9876543");
        assert_eq!(ImoNumber::parse("1234567").unwrap().as_str(), "1234567");
        assert_eq!(ImoNumber::parse("1014618").unwrap().as_str(), "1014618");
        assert_eq!(ImoNumber::parse("9347126").unwrap().as_str(), "9347126");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(ImoNumber::parse(" 9876543 ").unwrap().as_str(), "9876543");
    }

    #[test]
    fn test_bad_check_digit() {
        let err = ImoNumber::parse("9876544").unwrap_err();
        assert!(err.to_string().contains("check digit"));
    }

    #[test]
    fn test_wrong_shape() {
        assert!(ImoNumber::parse("12345").is_err());
        assert!(ImoNumber::parse("12345678").is_err());
        assert!(ImoNumber::parse("98765A3").is_err());
        assert!(ImoNumber::parse("").is_err());
    }
}
