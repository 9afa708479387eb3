//! Register Use Case
//!
//! Public self-registration. New accounts start with the `user` role;
//! admin-created accounts go through the manage-users surface instead.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub user_name: String,
    pub password: String,
    pub full_name: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let email =
            Email::new(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UsernameTaken);
        }

        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(
            email,
            user_name,
            password_hash,
            input.full_name.trim().to_string(),
        );

        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{user_role::UserRole, user_status::UserStatus};
    use crate::testing::{MemoryRepo, test_config, test_user};

    fn use_case(users: &Arc<MemoryRepo>) -> RegisterUseCase<MemoryRepo> {
        RegisterUseCase::new(users.clone(), Arc::new(test_config()))
    }

    fn valid_input() -> RegisterInput {
        RegisterInput {
            email: "new@example.com".to_string(),
            user_name: "newcomer".to_string(),
            password: "a sufficiently long password".to_string(),
            full_name: "  New Person  ".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_plain_user() {
        let users = Arc::new(MemoryRepo::default());
        let user = use_case(&users).execute(valid_input()).await.unwrap();

        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.full_name, "New Person");
        assert!(!user.email_verified);
        assert!(users.get(&user.user_id).is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let users = Arc::new(MemoryRepo::default());
        users.insert(test_user("new@example.com", "someone", UserRole::User));

        let err = use_case(&users).execute(valid_input()).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_case_insensitively() {
        let users = Arc::new(MemoryRepo::default());
        users.insert(test_user("other@example.com", "NewComer", UserRole::User));

        let err = use_case(&users).execute(valid_input()).await.unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let users = Arc::new(MemoryRepo::default());
        let input = RegisterInput {
            password: "short".to_string(),
            ..valid_input()
        };

        let err = use_case(&users).execute(input).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }
}
