//! Application Configuration
//!
//! Configuration for the Auth application layer. The signing secret and
//! cookie flags are read from the environment once at startup and passed
//! in explicitly, never looked up ambiently, so tests can supply a fixed
//! secret deterministically.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Secret key for HMAC token signing (32 bytes)
    pub token_secret: [u8; 32],
    /// Token/session TTL without "Remember Me" (1 day)
    pub token_ttl_short: Duration,
    /// Token/session TTL with "Remember Me" (30 days)
    pub token_ttl_long: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Redirect target for unauthenticated requests
    pub login_path: String,
    /// Redirect target for authenticated-but-unauthorized requests
    pub unauthorized_path: String,
    /// Budget for strong-path session store lookups; elapse means
    /// StoreUnavailable, never an indefinite hang
    pub store_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "cms_session".to_string(),
            token_secret: [0u8; 32],
            token_ttl_short: Duration::from_secs(24 * 3600), // 1 day
            token_ttl_long: Duration::from_secs(30 * 24 * 3600), // 30 days
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
            login_path: "/admin/login".to_string(),
            unauthorized_path: "/unauthorized".to_string(),
            store_timeout: Duration::from_secs(3),
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        let bytes = platform::crypto::random_bytes(32);
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&bytes);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// TTL for the given token lifetime
    pub fn ttl_for(&self, lifetime: crate::application::token::TokenLifetime) -> Duration {
        use crate::application::token::TokenLifetime;
        match lifetime {
            TokenLifetime::Short => self.token_ttl_short,
            TokenLifetime::Extended => self.token_ttl_long,
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie configuration for the session cookie
    ///
    /// Max-Age must match the token TTL; pass `None` when building the
    /// deletion cookie.
    pub fn cookie_config(&self, max_age_secs: Option<i64>) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs,
        }
    }
}
