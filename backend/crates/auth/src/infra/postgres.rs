//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_role::UserRole, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Startup sweep for rows already past expiry
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = SessionRepository::delete_expired(self).await?;

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                user_name,
                user_name_canonical,
                password_hash,
                full_name,
                avatar,
                user_role,
                user_status,
                email_verified,
                last_login_at,
                last_login_ip,
                login_count,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.password_hash.as_str())
        .bind(&user.full_name)
        .bind(&user.avatar)
        .bind(user.role.id())
        .bind(user.status.id())
        .bind(user.email_verified)
        .bind(user.last_login_at)
        .bind(&user.last_login_ip)
        .bind(user.login_count)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id, email, user_name, user_name_canonical, password_hash,
                full_name, avatar, user_role, user_status, email_verified,
                last_login_at, last_login_ip, login_count, created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id, email, user_name, user_name_canonical, password_hash,
                full_name, avatar, user_role, user_status, email_verified,
                last_login_at, last_login_ip, login_count, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id, email, user_name, user_name_canonical, password_hash,
                full_name, avatar, user_role, user_status, email_verified,
                last_login_at, last_login_ip, login_count, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                user_name = $3,
                user_name_canonical = $4,
                password_hash = $5,
                full_name = $6,
                avatar = $7,
                user_role = $8,
                user_status = $9,
                email_verified = $10,
                last_login_at = $11,
                last_login_ip = $12,
                login_count = $13,
                updated_at = $14
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.password_hash.as_str())
        .bind(&user.full_name)
        .bind(&user.avatar)
        .bind(user.role.id())
        .bind(user.status.id())
        .bind(user.email_verified)
        .bind(user.last_login_at)
        .bind(&user.last_login_ip)
        .bind(user.login_count)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                user_id,
                token_hash,
                client_ip,
                user_agent,
                expires_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_uuid())
        .bind(&session.token_hash)
        .bind(&session.client_ip)
        .bind(&session.user_agent)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_live(&self, user_id: &UserId, token_hash: &[u8]) -> AuthResult<bool> {
        // Expiry is filtered here; rows past it are dead even before the
        // sweep removes them.
        let live = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM sessions
                WHERE user_id = $1 AND token_hash = $2 AND expires_at > $3
            )
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(token_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(live)
    }

    async fn revoke(&self, user_id: &UserId, token_hash: &[u8]) -> AuthResult<u64> {
        let deleted =
            sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND token_hash = $2")
                .bind(user_id.as_uuid())
                .bind(token_hash)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(deleted)
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn delete_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    user_name: String,
    #[allow(dead_code)]
    user_name_canonical: String,
    password_hash: String,
    full_name: String,
    avatar: Option<String>,
    user_role: i16,
    user_status: i16,
    email_verified: bool,
    last_login_at: Option<DateTime<Utc>>,
    last_login_ip: Option<String>,
    login_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = UserPassword::from_db(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        let role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role id: {}", self.user_role)))?;

        let status = UserStatus::from_id(self.user_status).ok_or_else(|| {
            AuthError::Internal(format!("Invalid status id: {}", self.user_status))
        })?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            user_name: UserName::from_db(self.user_name),
            password_hash,
            full_name: self.full_name,
            avatar: self.avatar,
            role,
            status,
            email_verified: self.email_verified,
            last_login_at: self.last_login_at,
            last_login_ip: self.last_login_ip,
            login_count: self.login_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
