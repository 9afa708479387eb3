//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token on a request that requires one
    #[error("Authentication required")]
    NoToken,

    /// Token rejected by the codec (malformed / bad signature / expired)
    #[error("Invalid token: {0}")]
    Token(#[from] TokenError),

    /// Token verified but the session row is gone or expired (revoked)
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Role is insufficient for the requested resource
    #[error("Insufficient role")]
    Forbidden,

    /// Session store could not be reached or timed out.
    /// Never conflated with Forbidden: infrastructure trouble must not
    /// read as "you lack permission".
    #[error("Session store unavailable")]
    StoreUnavailable,

    /// Invalid credentials (unknown email or wrong password - the login
    /// boundary never says which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account exists but is not active yet
    #[error("Account is inactive")]
    AccountInactive,

    /// Account is disabled
    #[error("Account is disabled")]
    AccountDisabled,

    /// Email already registered
    #[error("Email already in use")]
    EmailTaken,

    /// Username already registered
    #[error("Username already in use")]
    UsernameTaken,

    /// A super admin tried to demote themselves
    #[error("Cannot remove your own super admin role")]
    SelfDemotion,

    /// An admin tried to delete their own account
    #[error("Cannot delete your own account")]
    SelfDeletion,

    /// Target user does not exist
    #[error("User not found")]
    UserNotFound,

    /// Input failed value-object validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error other than unavailability
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NoToken
            | AuthError::Token(_)
            | AuthError::SessionInvalid
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden
            | AuthError::AccountInactive
            | AuthError::AccountDisabled
            | AuthError::SelfDemotion
            | AuthError::SelfDeletion => StatusCode::FORBIDDEN,
            AuthError::EmailTaken | AuthError::UsernameTaken => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::NoToken
            | AuthError::Token(_)
            | AuthError::SessionInvalid
            | AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::Forbidden
            | AuthError::AccountInactive
            | AuthError::AccountDisabled
            | AuthError::SelfDemotion
            | AuthError::SelfDeletion => ErrorKind::Forbidden,
            AuthError::EmailTaken | AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::StoreUnavailable => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::StoreUnavailable => {
                tracing::error!("Session store unavailable");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::SelfDemotion | AuthError::SelfDeletion => {
                tracing::warn!(error = %self, "Self-targeting admin operation rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        // Connection-level trouble is surfaced distinctly so callers can
        // fail closed without reporting a permissions problem.
        match err {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AuthError::StoreUnavailable
            }
            other => AuthError::Database(other),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<crate::domain::policy::PolicyViolation> for AuthError {
    fn from(violation: crate::domain::policy::PolicyViolation) -> Self {
        use crate::domain::policy::PolicyViolation;
        match violation {
            PolicyViolation::SelfDemotion => AuthError::SelfDemotion,
            PolicyViolation::SelfDeletion => AuthError::SelfDeletion,
        }
    }
}
