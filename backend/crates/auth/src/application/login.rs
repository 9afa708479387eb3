//! Login Use Case
//!
//! Authenticates a user by email and password, issues a signed token,
//! and persists the matching session row.

use std::sync::Arc;

use platform::client::RequestOrigin;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenCodec, TokenLifetime};
use crate::domain::entity::session::Session;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_password::RawPassword, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// Selects the extended (30 day) token lifetime
    pub remember_me: bool,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed token for the cookie / response body
    pub token: String,
    /// The authenticated user, with login bookkeeping applied
    pub user: User,
    /// Lifetime the token was issued with
    pub lifetime: TokenLifetime,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
    codec: TokenCodec,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        let codec = TokenCodec::new(config.clone());
        Self {
            user_repo,
            session_repo,
            config,
            codec,
        }
    }

    pub async fn execute(
        &self,
        input: LoginInput,
        origin: RequestOrigin,
    ) -> AuthResult<LoginOutput> {
        // Unknown email and wrong password must be indistinguishable to
        // the caller, so every pre-verification failure collapses into
        // InvalidCredentials.
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        match user.status {
            UserStatus::Active => {}
            UserStatus::Inactive => return Err(AuthError::AccountInactive),
            UserStatus::Disabled => return Err(AuthError::AccountDisabled),
        }

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Issue token, then persist the session row that makes it revocable
        let lifetime = TokenLifetime::from_remember_me(input.remember_me);
        let token = self.codec.issue(&user, lifetime)?;

        let ttl = chrono::Duration::from_std(self.config.ttl_for(lifetime))
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

        let session = Session::new(
            user.user_id,
            &token,
            origin.ip_string(),
            origin.user_agent.clone(),
            ttl,
        );
        self.session_repo.create(&session).await?;

        // Login bookkeeping
        let mut user = user;
        user.record_login(origin.ip_string());
        self.user_repo.update(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            remember_me = input.remember_me,
            "User logged in"
        );

        Ok(LoginOutput {
            token,
            user,
            lifetime,
        })
    }
}
