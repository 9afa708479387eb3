//! Logout Use Case
//!
//! Revokes the session row matching the presented token. Idempotent:
//! a second logout with the same token finds nothing to delete and is
//! still a success.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    codec: TokenCodec,
}

impl<S> LogoutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        let codec = TokenCodec::new(config);
        Self {
            session_repo,
            codec,
        }
    }

    /// Revoke the session behind `token`.
    ///
    /// Revocation is keyed by (user, token hash): the user id comes out
    /// of the verified claims, so a forged token with a guessed value
    /// cannot revoke another user's session. A token the codec rejects
    /// has no live session to revoke and is treated as already logged
    /// out.
    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let claims = match self.codec.verify_fast(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Logout with dead token, nothing to revoke");
                return Ok(());
            }
        };

        let user_id = UserId::from_uuid(claims.sub);
        let token_hash = Session::hash_token(token);

        let deleted = self.session_repo.revoke(&user_id, &token_hash).await?;

        tracing::info!(user_id = %user_id, deleted, "User logged out");
        Ok(())
    }
}
