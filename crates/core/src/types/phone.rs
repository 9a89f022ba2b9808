//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character that is not a digit, separator, or
    /// leading plus sign.
    #[error("phone number contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The input has too few digits.
    #[error("phone number must have at least {min} digits")]
    TooShort {
        /// Minimum number of digits.
        min: usize,
    },
    /// The input has too many digits.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum number of digits (E.164 limit).
        max: usize,
    },
}

/// A phone number, normalized to E.164 form.
///
/// Parsing strips common separators, converts the Russian trunk prefix `8`
/// to `+7`, and stores the result as `+` followed by 10-15 digits.
///
/// ## Constraints
///
/// - Input may contain digits, spaces, dashes, parentheses, and one
///   leading `+`
/// - 10-15 digits after normalization (E.164 limit)
///
/// ## Examples
///
/// ```
/// use samovar_core::PhoneNumber;
///
/// // Valid numbers
/// assert!(PhoneNumber::parse("+79123456789").is_ok());
/// assert!(PhoneNumber::parse("8 (912) 345-67-89").is_ok());
///
/// // Invalid numbers
/// assert!(PhoneNumber::parse("").is_err());        // empty
/// assert!(PhoneNumber::parse("call me").is_err()); // letters
/// assert!(PhoneNumber::parse("+7912").is_err());   // too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits after normalization.
    pub const MIN_DIGITS: usize = 10;

    /// Maximum number of digits after normalization (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// Spaces, dashes, and parentheses are stripped. A number written with
    /// the Russian trunk prefix (`8` plus ten digits) is rewritten to the
    /// international `+7` form.
    ///
    /// ```
    /// # fn main() -> Result<(), samovar_core::PhoneError> {
    /// use samovar_core::PhoneNumber;
    ///
    /// let phone = PhoneNumber::parse("8 (912) 345-67-89")?;
    /// assert_eq!(phone.as_str(), "+79123456789");
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Contains characters other than digits, separators, and a leading `+`
    /// - Has fewer than 10 or more than 15 digits after normalization
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut digits = String::with_capacity(s.len());
        let mut has_plus = false;

        for (i, c) in s.char_indices() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '(' | ')' => {}
                '+' if i == 0 => has_plus = true,
                _ => return Err(PhoneError::InvalidCharacter(c)),
            }
        }

        // Russian trunk prefix: 8 XXX XXX-XX-XX is the same number as +7 XXX XXX-XX-XX.
        if !has_plus && digits.len() == 11 && digits.starts_with('8') {
            digits.replace_range(..1, "7");
        }

        if digits.len() < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }

        if digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(format!("+{digits}")))
    }

    /// Returns the phone number as a string slice, e.g. `"+79123456789"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
