//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The issued token (also set as the session cookie)
    pub token: String,
    pub user: UserDto,
}

// ============================================================================
// Who am I
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
}

// ============================================================================
// Registration
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: String,
}

// ============================================================================
// Public user shape
// ============================================================================

/// User payload returned by login / me / register
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub username: String,
    pub avatar: Option<String>,
    pub role: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            email: user.email.as_str().to_string(),
            full_name: user.full_name.clone(),
            username: user.user_name.original().to_string(),
            avatar: user.avatar.clone(),
            role: user.role.code().to_string(),
        }
    }
}

// ============================================================================
// Admin user management
// ============================================================================

/// Admin-creation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: String,
    /// Canonical role code (user, admin, super_admin)
    pub role: String,
}

/// Admin update request; omitted fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub role: Option<String>,
    pub status: Option<String>,
    pub full_name: Option<String>,
}

/// Full user row for the admin panel
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserDto {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub role: String,
    pub status: String,
    pub email_verified: bool,
    pub last_login_at: Option<i64>,
    pub last_login_ip: Option<String>,
    pub login_count: i64,
    pub created_at: i64,
}

impl From<&User> for AdminUserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            email: user.email.as_str().to_string(),
            username: user.user_name.original().to_string(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            role: user.role.code().to_string(),
            status: user.status.code().to_string(),
            email_verified: user.email_verified,
            last_login_at: user.last_login_at.map(|t| t.timestamp_millis()),
            last_login_ip: user.last_login_ip.clone(),
            login_count: user.login_count,
            created_at: user.created_at.timestamp_millis(),
        }
    }
}
