//! Session Entity
//!
//! A live login instance. The session row is the durable owner of
//! "is this token still live": the token's signature only proves
//! issuance, this row proves the login has not been revoked.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::user_id::UserId;

/// Persisted session record
///
/// Stores the SHA-256 hash of the issued token, never the token itself,
/// so a leaked sessions table cannot be replayed.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Owning user
    pub user_id: UserId,
    /// SHA-256 of the issued token string
    pub token_hash: Vec<u8>,
    /// Origin address at login (for session listings)
    pub client_ip: Option<String>,
    /// User agent string at login
    pub user_agent: Option<String>,
    /// Expiry; rows at or past this instant are never accepted
    pub expires_at: DateTime<Utc>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for an issued token
    ///
    /// TTL comes from the application config, matching the token's own
    /// embedded expiry.
    pub fn new(
        user_id: UserId,
        token: &str,
        client_ip: Option<String>,
        user_agent: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            token_hash: Self::hash_token(token),
            client_ip,
            user_agent,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// Hash a token string for storage or lookup
    pub fn hash_token(token: &str) -> Vec<u8> {
        platform::crypto::sha256(token.as_bytes()).to_vec()
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_not_expired() {
        let session = Session::new(
            UserId::new(),
            "some.token",
            Some("192.0.2.1".to_string()),
            Some("Mozilla/5.0".to_string()),
            Duration::days(1),
        );
        assert!(!session.is_expired());
        assert_eq!(session.token_hash.len(), 32);
    }

    #[test]
    fn test_expired_session() {
        let mut session = Session::new(UserId::new(), "t", None, None, Duration::days(1));
        session.expires_at = Utc::now() - Duration::seconds(1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_token_hash_is_deterministic() {
        assert_eq!(Session::hash_token("abc"), Session::hash_token("abc"));
        assert_ne!(Session::hash_token("abc"), Session::hash_token("abd"));
    }
}
