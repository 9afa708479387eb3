//! User Name Value Object
//!
//! Unique handle used for display and admin lookup. The original casing
//! is preserved for display; uniqueness is enforced on the lowercase
//! canonical form.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const MIN_USER_NAME_LENGTH: usize = 3;
const MAX_USER_NAME_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Username must be at least {MIN_USER_NAME_LENGTH} characters")]
    TooShort,
    #[error("Username must be at most {MAX_USER_NAME_LENGTH} characters")]
    TooLong,
    #[error("Username may only contain letters, digits, '_' and '-'")]
    InvalidCharacter,
    #[error("Username must start with a letter or digit")]
    InvalidStart,
}

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    pub fn new(raw: &str) -> Result<Self, UserNameError> {
        let trimmed = raw.trim();

        let char_count = trimmed.chars().count();
        if char_count < MIN_USER_NAME_LENGTH {
            return Err(UserNameError::TooShort);
        }
        if char_count > MAX_USER_NAME_LENGTH {
            return Err(UserNameError::TooLong);
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(UserNameError::InvalidCharacter);
        }

        let first = trimmed.chars().next().expect("length checked above");
        if !first.is_ascii_alphanumeric() {
            return Err(UserNameError::InvalidStart);
        }

        Ok(Self {
            original: trimmed.to_string(),
            canonical: trimmed.to_ascii_lowercase(),
        })
    }

    /// Restore from the database without re-validation
    pub fn from_db(original: String) -> Self {
        let canonical = original.to_ascii_lowercase();
        Self { original, canonical }
    }

    /// Display form as entered by the user
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase form used for the uniqueness constraint
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
