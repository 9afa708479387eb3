//! Manage Users Use Case
//!
//! Admin user surface: listing, admin-creation, role/status changes,
//! and deletion. Role changes and deletion run through the role policy
//! guards so a super admin can never demote or delete themselves.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::policy;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName,
    user_password::{RawPassword, UserPassword}, user_role::UserRole, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

/// The verified identity performing an admin operation
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: UserId,
    pub role: UserRole,
}

/// Admin-creation input
pub struct CreateUserInput {
    pub email: String,
    pub user_name: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
}

/// Update input; `None` leaves a field untouched
#[derive(Default)]
pub struct UpdateUserInput {
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub full_name: Option<String>,
}

/// Manage users use case
pub struct ManageUsersUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> ManageUsersUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// List all users, newest first
    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list().await
    }

    /// Create a user from the admin surface, with an explicit role
    pub async fn create(&self, input: CreateUserInput) -> AuthResult<User> {
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

        let mut user = User::new(
            email,
            user_name,
            password_hash,
            input.full_name.trim().to_string(),
        );
        user.set_role(input.role);

        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User created from admin surface"
        );

        Ok(user)
    }

    /// Apply role/status/profile changes to a user
    pub async fn update(
        &self,
        actor: &Actor,
        target_id: &UserId,
        input: UpdateUserInput,
    ) -> AuthResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(role) = input.role {
            policy::guard_role_change(&actor.user_id, actor.role, target_id, role)?;
            user.set_role(role);
        }

        if let Some(status) = input.status {
            user.set_status(status);
            // A user who can no longer log in keeps no live sessions
            if !status.can_login() {
                let revoked = self.session_repo.revoke_all_for_user(target_id).await?;
                tracing::info!(
                    user_id = %target_id,
                    revoked,
                    status = %status,
                    "Sessions revoked on status change"
                );
            }
        }

        if let Some(full_name) = input.full_name {
            let avatar = user.avatar.clone();
            user.set_profile(full_name.trim().to_string(), avatar);
        }

        self.user_repo.update(&user).await?;
        Ok(user)
    }

    /// Delete a user and (via the store) their sessions
    pub async fn delete(&self, actor: &Actor, target_id: &UserId) -> AuthResult<()> {
        policy::guard_user_delete(&actor.user_id, target_id)?;

        self.user_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.session_repo.revoke_all_for_user(target_id).await?;
        self.user_repo.delete(target_id).await?;

        tracing::info!(user_id = %target_id, actor = %actor.user_id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryRepo, test_config, test_user};

    fn use_case(
        users: &Arc<MemoryRepo>,
        sessions: &Arc<MemoryRepo>,
    ) -> ManageUsersUseCase<MemoryRepo, MemoryRepo> {
        ManageUsersUseCase::new(users.clone(), sessions.clone(), Arc::new(test_config()))
    }

    #[tokio::test]
    async fn test_super_admin_cannot_demote_self() {
        let users = Arc::new(MemoryRepo::default());
        let sessions = Arc::new(MemoryRepo::default());
        let root = test_user("root@example.com", "root", UserRole::SuperAdmin);
        users.insert(root.clone());

        let actor = Actor {
            user_id: root.user_id,
            role: UserRole::SuperAdmin,
        };

        let err = use_case(&users, &sessions)
            .update(
                &actor,
                &root.user_id,
                UpdateUserInput {
                    role: Some(UserRole::Admin),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::SelfDemotion));
        // Nothing was persisted
        assert_eq!(users.get(&root.user_id).unwrap().role, UserRole::SuperAdmin);
    }

    #[tokio::test]
    async fn test_super_admin_may_demote_someone_else() {
        let users = Arc::new(MemoryRepo::default());
        let sessions = Arc::new(MemoryRepo::default());
        let root = test_user("root@example.com", "root", UserRole::SuperAdmin);
        let other = test_user("admin@example.com", "admin", UserRole::Admin);
        users.insert(root.clone());
        users.insert(other.clone());

        let actor = Actor {
            user_id: root.user_id,
            role: UserRole::SuperAdmin,
        };

        let updated = use_case(&users, &sessions)
            .update(
                &actor,
                &other.user_id,
                UpdateUserInput {
                    role: Some(UserRole::User),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_self_deletion_refused() {
        let users = Arc::new(MemoryRepo::default());
        let sessions = Arc::new(MemoryRepo::default());
        let root = test_user("root@example.com", "root", UserRole::SuperAdmin);
        users.insert(root.clone());

        let actor = Actor {
            user_id: root.user_id,
            role: UserRole::SuperAdmin,
        };

        let err = use_case(&users, &sessions)
            .delete(&actor, &root.user_id)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::SelfDeletion));
        assert!(users.get(&root.user_id).is_some());
    }

    #[tokio::test]
    async fn test_disabling_revokes_sessions() {
        use crate::application::login::{LoginInput, LoginUseCase};
        use platform::client::RequestOrigin;

        let users = Arc::new(MemoryRepo::default());
        let sessions = Arc::new(MemoryRepo::default());
        let target = test_user("editor@example.com", "editor", UserRole::User);
        users.insert(target.clone());

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
            .unwrap();
        assert_eq!(sessions.count(), 1);

        let root = test_user("root@example.com", "root", UserRole::SuperAdmin);
        users.insert(root.clone());
        let actor = Actor {
            user_id: root.user_id,
            role: UserRole::SuperAdmin,
        };

        use_case(&users, &sessions)
            .update(
                &actor,
                &target.user_id,
                UpdateUserInput {
                    status: Some(UserStatus::Disabled),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(sessions.count(), 0);
    }

    #[tokio::test]
    async fn test_admin_created_user_carries_role() {
        let users = Arc::new(MemoryRepo::default());
        let sessions = Arc::new(MemoryRepo::default());

        let created = use_case(&users, &sessions)
            .create(CreateUserInput {
                email: "staff@example.com".to_string(),
                user_name: "staff".to_string(),
                password: "a sufficiently long password".to_string(),
                full_name: "Staff Member".to_string(),
                role: UserRole::Admin,
            })
            .await
            .unwrap();

        assert_eq!(created.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_not_found() {
        let users = Arc::new(MemoryRepo::default());
        let sessions = Arc::new(MemoryRepo::default());
        let actor = Actor {
            user_id: UserId::new(),
            role: UserRole::SuperAdmin,
        };

        let err = use_case(&users, &sessions)
            .update(&actor, &UserId::new(), UpdateUserInput::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UserNotFound));
    }
}
