//! Auth Router

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the public auth router (`/api/auth`) with the PostgreSQL
/// repository
pub fn auth_router(repo: PgAuthRepository, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(Arc::new(repo), config)
}

/// Create the public auth router for any repository implementation
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let state = AuthAppState { repo, config };

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/me", get(handlers::me::<R>))
        .route("/register", post(handlers::register::<R>))
        .with_state(state)
}

/// Create the admin user-management router (`/admin/api/users`).
///
/// Mount behind the auth gate; handlers read the identity the gate
/// attached.
pub fn admin_user_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let state = AuthAppState { repo, config };

    Router::new()
        .route(
            "/",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route(
            "/{id}",
            put(handlers::update_user::<R>).delete(handlers::delete_user::<R>),
        )
        .with_state(state)
}
