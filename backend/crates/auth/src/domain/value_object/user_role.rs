use serde::{Deserialize, Serialize};
use std::fmt;

/// User role, ordered by privilege.
///
/// The canonical wire/storage form is the lowercase snake_case code
/// (`user`, `admin`, `super_admin`); every boundary normalizes through
/// [`UserRole::from_code`] and unknown codes are rejected, never guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    User = 0,
    Admin = 1,
    SuperAdmin = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            User => "user",
            Admin => "admin",
            SuperAdmin => "super_admin",
        }
    }

    /// Privilege rank for ordered comparisons
    #[inline]
    pub const fn rank(&self) -> i16 {
        self.id()
    }

    #[inline]
    pub const fn is_admin_or_higher(&self) -> bool {
        use UserRole::*;
        matches!(self, Admin | SuperAdmin)
    }

    #[inline]
    pub const fn is_super_admin(&self) -> bool {
        matches!(self, UserRole::SuperAdmin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use UserRole::*;
        match id {
            0 => Some(User),
            1 => Some(Admin),
            2 => Some(SuperAdmin),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "user" => Some(User),
            "admin" => Some(Admin),
            "super_admin" => Some(SuperAdmin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
