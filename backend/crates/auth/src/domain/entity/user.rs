//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_role::UserRole, user_status::UserStatus,
};

/// User identity record
///
/// Email and username are each globally unique (enforced by the store).
/// The auth subsystem never hard-deletes a user; deletion goes through
/// the admin surface behind the self-deletion guard.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Unique login email (canonical lowercase)
    pub email: Email,
    /// Unique username (display casing preserved)
    pub user_name: UserName,
    /// Argon2id password hash
    pub password_hash: UserPassword,
    /// Full display name
    pub full_name: String,
    /// Avatar image path (served by the upload collaborator)
    pub avatar: Option<String>,
    /// Role (user, admin, super_admin)
    pub role: UserRole,
    /// Status (active, inactive, disabled)
    pub status: UserStatus,
    /// Whether the email address has been confirmed
    pub email_verified: bool,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Origin address of the last successful login
    pub last_login_ip: Option<String>,
    /// Number of successful logins
    pub login_count: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role and status
    pub fn new(
        email: Email,
        user_name: UserName,
        password_hash: UserPassword,
        full_name: String,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            user_name,
            password_hash,
            full_name,
            avatar: None,
            role: UserRole::default(),
            status: UserStatus::default(),
            email_verified: false,
            last_login_at: None,
            last_login_ip: None,
            login_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login bookkeeping
    pub fn record_login(&mut self, origin_ip: Option<String>) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.last_login_ip = origin_ip;
        self.login_count += 1;
        self.updated_at = now;
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    /// Update user role
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Update user status
    pub fn set_status(&mut self, status: UserStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Update password hash
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Mark the email address as confirmed
    pub fn verify_email(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    /// Update profile fields
    pub fn set_profile(&mut self, full_name: String, avatar: Option<String>) {
        self.full_name = full_name;
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }
}
