//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email (canonical form)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Check if a username is already taken (canonical form)
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// List all users, newest first
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete user
    async fn delete(&self, user_id: &UserId) -> AuthResult<()>;
}

/// Session repository trait
///
/// This store is the only durable owner of token liveness. Lookups and
/// revocation are keyed by (user, token hash) so a forged token with a
/// guessed value cannot touch another user's sessions.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Persist a new session. A user may hold any number of concurrent
    /// sessions (multi-device).
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Existence + not-expired check for the strong verification path
    async fn is_live(&self, user_id: &UserId, token_hash: &[u8]) -> AuthResult<bool>;

    /// Delete session rows matching both user and token hash exactly.
    /// Returns the number of rows deleted; 0 is a successful no-op so
    /// logout stays idempotent.
    async fn revoke(&self, user_id: &UserId, token_hash: &[u8]) -> AuthResult<u64>;

    /// Delete all sessions for a user (password change, account disable)
    async fn revoke_all_for_user(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Remove rows already past expiry. Lazy expiry at read time is the
    /// correctness mechanism; this just bounds table growth.
    async fn delete_expired(&self) -> AuthResult<u64>;
}
