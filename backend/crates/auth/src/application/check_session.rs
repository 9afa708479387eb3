//! Check Session Use Case
//!
//! The **strong path**: fast-path token verification plus a session
//! store liveness lookup. Used before privileged mutations and by the
//! who-am-I endpoint, where revocation must actually matter.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{Claims, TokenCodec, TokenError};
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
    codec: TokenCodec,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        let codec = TokenCodec::new(config.clone());
        Self {
            session_repo,
            config,
            codec,
        }
    }

    /// Fast path only: signature + expiry, no store access
    pub fn verify_fast(&self, token: &str) -> Result<Claims, TokenError> {
        self.codec.verify_fast(token)
    }

    /// Strong path: fast path plus session store liveness.
    ///
    /// The store lookup is bounded by the configured timeout; elapse is
    /// `StoreUnavailable`, never an indefinite hang, and callers fail
    /// closed on it.
    pub async fn verify_live(&self, token: &str) -> AuthResult<Claims> {
        let claims = self.codec.verify_fast(token)?;

        let user_id = UserId::from_uuid(claims.sub);
        let token_hash = Session::hash_token(token);

        let live = match tokio::time::timeout(
            self.config.store_timeout,
            self.session_repo.is_live(&user_id, &token_hash),
        )
        .await
        {
            Ok(result) => result?,
            Err(_elapsed) => return Err(AuthError::StoreUnavailable),
        };

        if !live {
            return Err(AuthError::SessionInvalid);
        }

        Ok(claims)
    }

    /// Boolean form of the strong path
    pub async fn is_valid(&self, token: &str) -> bool {
        self.verify_live(token).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::login::{LoginInput, LoginUseCase};
    use crate::application::logout::LogoutUseCase;
    use crate::domain::value_object::user_role::UserRole;
    use crate::testing::{MemoryRepo, test_config, test_user};
    use platform::client::RequestOrigin;

    async fn logged_in_token(
        users: &Arc<MemoryRepo>,
        sessions: &Arc<MemoryRepo>,
    ) -> String {
        users.insert(test_user("editor@example.com", "editor", UserRole::User));
        LoginUseCase::new(users.clone(), sessions.clone(), Arc::new(test_config()))
            .execute(
                LoginInput {
                    email: "editor@example.com".to_string(),
                    password: "a sufficiently long password".to_string(),
                    remember_me: false,
                },
                RequestOrigin::default(),
            )
            .await
            .unwrap()
            .token
    }

    #[tokio::test]
    async fn test_strong_path_accepts_live_session() {
        let users = Arc::new(MemoryRepo::default());
        let sessions = Arc::new(MemoryRepo::default());
        let token = logged_in_token(&users, &sessions).await;

        let use_case = CheckSessionUseCase::new(sessions.clone(), Arc::new(test_config()));
        let claims = use_case.verify_live(&token).await.unwrap();
        assert_eq!(claims.email, "editor@example.com");
    }

    #[tokio::test]
    async fn test_revocation_divides_fast_and_strong_paths() {
        // The core round-trip law: after revocation the signature still
        // verifies, but the strong path fails.
        let users = Arc::new(MemoryRepo::default());
        let sessions = Arc::new(MemoryRepo::default());
        let token = logged_in_token(&users, &sessions).await;

        LogoutUseCase::new(sessions.clone(), Arc::new(test_config()))
            .execute(&token)
            .await
            .unwrap();

        let use_case = CheckSessionUseCase::new(sessions.clone(), Arc::new(test_config()));
        assert!(use_case.verify_fast(&token).is_ok());

        let err = use_case.verify_live(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionInvalid));
        assert!(!use_case.is_valid(&token).await);
    }

    #[tokio::test]
    async fn test_expired_session_row_is_not_live() {
        let users = Arc::new(MemoryRepo::default());
        let sessions = Arc::new(MemoryRepo::default());
        let token = logged_in_token(&users, &sessions).await;

        sessions.expire_all();

        let use_case = CheckSessionUseCase::new(sessions.clone(), Arc::new(test_config()));
        let err = use_case.verify_live(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionInvalid));
    }

    #[tokio::test]
    async fn test_store_outage_is_store_unavailable() {
        let users = Arc::new(MemoryRepo::default());
        let sessions = Arc::new(MemoryRepo::default());
        let token = logged_in_token(&users, &sessions).await;

        sessions.set_available(false);

        let use_case = CheckSessionUseCase::new(sessions.clone(), Arc::new(test_config()));
        let err = use_case.verify_live(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable));
    }

    #[tokio::test]
    async fn test_garbage_token_fails_fast_without_store_access() {
        let sessions = Arc::new(MemoryRepo::default());
        sessions.set_available(false); // store access would error

        let use_case = CheckSessionUseCase::new(sessions.clone(), Arc::new(test_config()));
        let err = use_case.verify_live("garbage").await.unwrap_err();
        assert!(matches!(err, AuthError::Token(TokenError::Malformed)));
    }
}
