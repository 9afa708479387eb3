//! In-memory repository fake shared by unit tests.
//!
//! One store implements both repository traits, mirroring the shape of
//! the PostgreSQL repository.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Duration, Utc};

use crate::application::config::AuthConfig;
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName,
    user_password::{RawPassword, UserPassword}, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// The password every [`test_user`] is created with.
pub const TEST_PASSWORD: &str = "a sufficiently long password";

/// Config with a fixed secret so tokens verify deterministically.
pub fn test_config() -> AuthConfig {
    AuthConfig {
        token_secret: [7u8; 32],
        cookie_secure: false,
        ..Default::default()
    }
}

/// Build an active user with [`TEST_PASSWORD`] and the given role.
pub fn test_user(email: &str, user_name: &str, role: UserRole) -> User {
    let raw = RawPassword::new(TEST_PASSWORD.to_string()).unwrap();
    let mut user = User::new(
        Email::new(email).unwrap(),
        UserName::new(user_name).unwrap(),
        UserPassword::from_raw(&raw, None).unwrap(),
        "Test Person".to_string(),
    );
    user.set_role(role);
    user
}

/// In-memory user + session store
#[derive(Default)]
pub struct MemoryRepo {
    users: Mutex<Vec<User>>,
    sessions: Mutex<Vec<Session>>,
    unavailable: AtomicBool,
}

impl MemoryRepo {
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn get(&self, user_id: &UserId) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned()
    }

    /// Number of stored session rows
    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Simulate a store outage; session operations return StoreUnavailable.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Backdate every session row past its expiry.
    pub fn expire_all(&self) {
        let past = Utc::now() - Duration::seconds(1);
        for session in self.sessions.lock().unwrap().iter_mut() {
            session.expires_at = past;
        }
    }

    fn check_available(&self) -> AuthResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::StoreUnavailable);
        }
        Ok(())
    }
}

impl UserRepository for MemoryRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.insert(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.get(user_id))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.email == *email))
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.user_name.canonical() == user_name.canonical()))
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(slot) = users.iter_mut().find(|u| u.user_id == user.user_id) {
            *slot = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        self.users.lock().unwrap().retain(|u| u.user_id != *user_id);
        Ok(())
    }
}

impl SessionRepository for MemoryRepo {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        self.check_available()?;
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn is_live(&self, user_id: &UserId, token_hash: &[u8]) -> AuthResult<bool> {
        self.check_available()?;
        Ok(self.sessions.lock().unwrap().iter().any(|s| {
            s.user_id == *user_id && s.token_hash == token_hash && !s.is_expired()
        }))
    }

    async fn revoke(&self, user_id: &UserId, token_hash: &[u8]) -> AuthResult<u64> {
        self.check_available()?;
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| !(s.user_id == *user_id && s.token_hash == token_hash));
        Ok((before - sessions.len()) as u64)
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        self.check_available()?;
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.user_id != *user_id);
        Ok((before - sessions.len()) as u64)
    }

    async fn delete_expired(&self) -> AuthResult<u64> {
        self.check_available()?;
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| !s.is_expired());
        Ok((before - sessions.len()) as u64)
    }
}
