//! User Name Value Object
//!
//! Public handle shown next to every book a user uploads.
//!
//! ## Invariants
//! - NFKC normalized and trimmed
//! - 3 to 30 characters
//! - No whitespace or control characters
//! - Uniqueness is decided on the lowercase `canonical` form

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username is too short ({length} chars, minimum {min})")]
    TooShort { length: usize, min: usize },

    #[error("Username is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Username cannot contain whitespace or control characters")]
    InvalidCharacter,
}

/// Validated, normalized user name
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserName {
    /// Trimmed, NFKC normalized input (case preserved)
    original: String,
    /// Lowercase form used for uniqueness
    canonical: String,
}

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();

        if original.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = original.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if original
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(UserNameError::InvalidCharacter);
        }

        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Rebuild from stored columns without re-validating
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserName({})", self.original)
    }
}
