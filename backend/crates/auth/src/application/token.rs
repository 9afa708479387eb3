//! Token Codec
//!
//! Issues and verifies the signed claim tokens carried by the session
//! cookie (or an Authorization header). A token is
//! `base64url(claims JSON) . base64url(HMAC-SHA256 signature)`.
//!
//! Verification here is the **fast path**: pure in-memory signature and
//! expiry checks, no store round-trip, suitable for a per-request edge
//! gate. It proves the token was issued by us and has not expired by its
//! own claim - it does NOT prove the session is still live. The **strong
//! path** (fast path plus session store lookup) lives in
//! [`crate::application::check_session::CheckSessionUseCase`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Token verification failure
///
/// All failure modes for attacker-controlled input are values, never
/// panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Not structurally decodable, or a required claim is missing
    #[error("token is malformed")]
    Malformed,
    /// Signature does not verify under the process secret
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Embedded expiry is in the past
    #[error("token has expired")]
    Expired,
}

/// Token lifetime selected by the "remember me" flag at login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLifetime {
    /// 1 day
    Short,
    /// 30 days
    Extended,
}

impl TokenLifetime {
    pub fn from_remember_me(remember_me: bool) -> Self {
        if remember_me {
            Self::Extended
        } else {
            Self::Short
        }
    }
}

/// Signed claims bundle
///
/// Every field is required; a decode missing any of them is `Malformed`.
/// The email rides along so the gate can propagate identity on the fast
/// path without a store lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject user id
    pub sub: Uuid,
    /// Subject email at issuance
    pub email: String,
    /// Role at issuance (canonical lowercase code on the wire)
    pub role: UserRole,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
}

/// Token codec
///
/// Pure function of (input, secret, current time); no side effects, no
/// suspension points.
#[derive(Clone)]
pub struct TokenCodec {
    config: Arc<AuthConfig>,
}

impl TokenCodec {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue a signed token for a user identity snapshot
    pub fn issue(&self, user: &User, lifetime: TokenLifetime) -> AuthResult<String> {
        let ttl = chrono::Duration::from_std(self.config.ttl_for(lifetime))
            .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {e}")))?;

        let now = Utc::now();
        let claims = Claims {
            sub: *user.user_id.as_uuid(),
            email: user.email.as_str().to_string(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        Ok(self.encode(&claims))
    }

    /// Encode and sign a claims bundle
    pub(crate) fn encode(&self, claims: &Claims) -> String {
        let payload = serde_json::to_vec(claims).expect("claims serialize to JSON");
        let payload_b64 = platform::crypto::to_base64url(&payload);

        let signature =
            platform::crypto::hmac_sha256(&self.config.token_secret, payload_b64.as_bytes());

        format!(
            "{}.{}",
            payload_b64,
            platform::crypto::to_base64url(&signature)
        )
    }

    /// Fast-path verification: decode, expiry, signature. No store access.
    ///
    /// Expiry is reported even when the signature no longer verifies; a
    /// dead token is dead either way, and callers treat both as a trip
    /// back to login.
    pub fn verify_fast(&self, token: &str) -> Result<Claims, TokenError> {
        let (payload_b64, signature_b64) =
            token.split_once('.').ok_or(TokenError::Malformed)?;

        let signature =
            platform::crypto::from_base64url(signature_b64).map_err(|_| TokenError::Malformed)?;
        let payload =
            platform::crypto::from_base64url(payload_b64).map_err(|_| TokenError::Malformed)?;

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        if !platform::crypto::hmac_sha256_verify(
            &self.config.token_secret,
            payload_b64.as_bytes(),
            &signature,
        ) {
            return Err(TokenError::InvalidSignature);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email, user_name::UserName, user_password::{RawPassword, UserPassword},
    };

    fn codec() -> TokenCodec {
        let config = AuthConfig {
            token_secret: [7u8; 32],
            ..Default::default()
        };
        TokenCodec::new(Arc::new(config))
    }

    fn sample_user(role: UserRole) -> User {
        let raw = RawPassword::new("a sufficiently long password".to_string()).unwrap();
        let mut user = User::new(
            Email::new("editor@example.com").unwrap(),
            UserName::new("editor").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            "Example Editor".to_string(),
        );
        user.set_role(role);
        user
    }

    fn claims_expiring_at(codec: &TokenCodec, exp: i64) -> String {
        let now = Utc::now().timestamp();
        codec.encode(&Claims {
            sub: Uuid::new_v4(),
            email: "editor@example.com".to_string(),
            role: UserRole::Admin,
            iat: now - 60,
            exp,
        })
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let codec = codec();
        let user = sample_user(UserRole::Admin);

        let token = codec.issue(&user, TokenLifetime::Short).unwrap();
        let claims = codec.verify_fast(&token).unwrap();

        assert_eq!(claims.sub, *user.user_id.as_uuid());
        assert_eq!(claims.email, "editor@example.com");
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_short_and_extended_lifetimes() {
        let codec = codec();
        let user = sample_user(UserRole::User);

        let short = codec.issue(&user, TokenLifetime::Short).unwrap();
        let claims = codec.verify_fast(&short).unwrap();
        assert_eq!(claims.exp - claims.iat, 86_400);

        let extended = codec.issue(&user, TokenLifetime::Extended).unwrap();
        let claims = codec.verify_fast(&extended).unwrap();
        assert_eq!(claims.exp - claims.iat, 2_592_000);
    }

    #[test]
    fn test_expired_token() {
        let codec = codec();
        let token = claims_expiring_at(&codec, Utc::now().timestamp() - 10);

        assert_eq!(codec.verify_fast(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_expired_wins_over_bad_signature() {
        // Past expiry is reported regardless of signature validity
        let codec = codec();
        let token = claims_expiring_at(&codec, Utc::now().timestamp() - 10);

        let (payload, signature) = token.split_once('.').unwrap();
        let mut sig_bytes = platform::crypto::from_base64url(signature).unwrap();
        sig_bytes[0] ^= 0x01;
        let tampered = format!("{payload}.{}", platform::crypto::to_base64url(&sig_bytes));

        assert_eq!(codec.verify_fast(&tampered), Err(TokenError::Expired));
    }

    #[test]
    fn test_signature_byte_flip() {
        let codec = codec();
        let user = sample_user(UserRole::User);
        let token = codec.issue(&user, TokenLifetime::Short).unwrap();

        let (payload, signature) = token.split_once('.').unwrap();
        let mut sig_bytes = platform::crypto::from_base64url(signature).unwrap();
        sig_bytes[5] ^= 0x01;
        let tampered = format!("{payload}.{}", platform::crypto::to_base64url(&sig_bytes));

        assert_eq!(
            codec.verify_fast(&tampered),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_payload_tamper_breaks_signature() {
        let codec = codec();
        let user = sample_user(UserRole::User);
        let token = codec.issue(&user, TokenLifetime::Short).unwrap();

        // Re-encode a different payload under the original signature
        let (_, signature) = token.split_once('.').unwrap();
        let other = codec.encode(&Claims {
            sub: Uuid::new_v4(),
            email: "attacker@example.com".to_string(),
            role: UserRole::SuperAdmin,
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        });
        let (other_payload, _) = other.split_once('.').unwrap();
        let spliced = format!("{other_payload}.{signature}");

        assert_eq!(
            codec.verify_fast(&spliced),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec_a = codec();
        let config_b = AuthConfig {
            token_secret: [8u8; 32],
            ..Default::default()
        };
        let codec_b = TokenCodec::new(Arc::new(config_b));

        let user = sample_user(UserRole::User);
        let token = codec_a.issue(&user, TokenLifetime::Short).unwrap();

        assert_eq!(
            codec_b.verify_fast(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        let codec = codec();

        assert_eq!(codec.verify_fast(""), Err(TokenError::Malformed));
        assert_eq!(codec.verify_fast("no-dot"), Err(TokenError::Malformed));
        assert_eq!(
            codec.verify_fast("!!!not-base64!!!.also-not"),
            Err(TokenError::Malformed)
        );

        // Valid base64 but not claims JSON
        let payload = platform::crypto::to_base64url(b"{\"sub\":\"x\"}");
        let sig = platform::crypto::to_base64url(&[0u8; 32]);
        assert_eq!(
            codec.verify_fast(&format!("{payload}.{sig}")),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_missing_claim_is_malformed() {
        let codec = codec();

        // Well-formed JSON object missing the role field
        let json = serde_json::json!({
            "sub": Uuid::new_v4(),
            "email": "editor@example.com",
            "iat": Utc::now().timestamp(),
            "exp": Utc::now().timestamp() + 3600,
        });
        let payload_b64 = platform::crypto::to_base64url(json.to_string().as_bytes());
        let signature = platform::crypto::hmac_sha256([7u8; 32].as_ref(), payload_b64.as_bytes());
        let token = format!(
            "{payload_b64}.{}",
            platform::crypto::to_base64url(&signature)
        );

        assert_eq!(codec.verify_fast(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_noncanonical_role_is_malformed() {
        let codec = codec();

        let json = serde_json::json!({
            "sub": Uuid::new_v4(),
            "email": "editor@example.com",
            "role": "SUPER_ADMIN",
            "iat": Utc::now().timestamp(),
            "exp": Utc::now().timestamp() + 3600,
        });
        let payload_b64 = platform::crypto::to_base64url(json.to_string().as_bytes());
        let signature = platform::crypto::hmac_sha256([7u8; 32].as_ref(), payload_b64.as_bytes());
        let token = format!(
            "{payload_b64}.{}",
            platform::crypto::to_base64url(&signature)
        );

        assert_eq!(codec.verify_fast(&token), Err(TokenError::Malformed));
    }
}
