//! Auth (Authentication / Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, role policy, repository traits
//! - `application/` - Token codec, use cases, configuration
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router, auth gate middleware
//!
//! ## Features
//! - Email + password login with short / extended ("remember me") sessions
//! - HMAC-SHA256 signed claim tokens, cookie or bearer transport
//! - Server-side session rows so logout actually revokes access
//! - Role-based gating of the admin surface (user / admin / super_admin)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Token signature proves issuance; the session row proves liveness.
//!   Both checks are required where revocation matters (the "strong path");
//!   routing decisions use the store-free "fast path".
//! - The gate fails closed: every failure maps to a redirect, never a 500

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{Claims, TokenCodec, TokenError, TokenLifetime};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, admin_user_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
