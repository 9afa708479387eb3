//! Email Value Object
//!
//! Normalized, validated email address. The stored form is trimmed and
//! lowercased so the uniqueness constraint sees one canonical spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum accepted email length (RFC 5321 path limit)
const MAX_EMAIL_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,
    #[error("Email must be at most {MAX_EMAIL_LENGTH} characters")]
    TooLong,
    #[error("Email format is invalid")]
    InvalidFormat,
}

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create from user input, normalizing to the canonical form.
    ///
    /// Validation is intentionally structural (one `@`, non-empty local
    /// part, domain with a dot, ASCII only) - deliverability is the mail
    /// system's problem, not ours.
    pub fn new(raw: &str) -> Result<Self, EmailError> {
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }
        if normalized.len() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong);
        }
        if !normalized.is_ascii() || normalized.contains(char::is_whitespace) {
            return Err(EmailError::InvalidFormat);
        }

        let (local, domain) = normalized.split_once('@').ok_or(EmailError::InvalidFormat)?;
        if local.is_empty() || domain.is_empty() {
            return Err(EmailError::InvalidFormat);
        }
        if domain.contains('@') {
            return Err(EmailError::InvalidFormat);
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(normalized))
    }

    /// Restore from the database (already canonical)
    pub fn from_db(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
