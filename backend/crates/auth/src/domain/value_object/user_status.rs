//! User Status Value Object
//!
//! Three account states, stored as a smallint:
//! - **Active**: normal account, may log in
//! - **Inactive**: registered but not yet enabled (or deactivated by an
//!   admin); may not log in
//! - **Disabled**: blocked account; may not log in
//!
//! There is no soft-delete state. Deletion is a physical delete performed
//! through the admin user surface, behind the self-deletion guard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserStatus {
    #[default]
    Active = 0,
    Inactive = 1,
    Disabled = 2,
}

impl UserStatus {
    /// Numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// String code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Disabled => "disabled",
        }
    }

    /// Check if login is allowed
    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Active),
            1 => Some(Self::Inactive),
            2 => Some(Self::Disabled),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_can_login() {
        assert!(UserStatus::Active.can_login());
        assert!(!UserStatus::Inactive.can_login());
        assert!(!UserStatus::Disabled.can_login());
    }

    #[test]
    fn test_id_roundtrip() {
        for status in [
            UserStatus::Active,
            UserStatus::Inactive,
            UserStatus::Disabled,
        ] {
            assert_eq!(UserStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(UserStatus::from_id(42), None);
    }

    #[test]
    fn test_code_roundtrip() {
        assert_eq!(UserStatus::from_code("active"), Some(UserStatus::Active));
        assert_eq!(UserStatus::from_code("inactive"), Some(UserStatus::Inactive));
        assert_eq!(UserStatus::from_code("disabled"), Some(UserStatus::Disabled));
        assert_eq!(UserStatus::from_code("deleted"), None);
    }
}
