//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::{HeaderMap, StatusCode, header, request::Parts};
use axum::response::{IntoResponse, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use platform::client::{RequestOrigin, extract_origin};

use crate::application::config::AuthConfig;
use crate::application::{
    Actor, CheckSessionUseCase, CreateUserInput, LoginInput, LoginUseCase, LogoutUseCase,
    ManageUsersUseCase, RegisterInput, RegisterUseCase, TokenLifetime, UpdateUserInput,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    user_id::UserId, user_role::UserRole, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AdminUserDto, CreateUserRequest, LoginRequest, LoginResponse, MeResponse, RegisterRequest,
    UpdateUserRequest, UserDto,
};
use crate::presentation::middleware::{AuthenticatedUser, extract_token};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Request origin extractor (direct IP when the server was started with
/// connect info, X-Forwarded-For and User-Agent from headers)
pub struct ClientOrigin(pub RequestOrigin);

impl<S> FromRequestParts<S> for ClientOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct_ip = parts
            .extensions
            .get::<axum::extract::ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());

        Ok(ClientOrigin(extract_origin(&parts.headers, direct_ip)))
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ClientOrigin(origin): ClientOrigin,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    // req のムーブ後も使えるように remember_me を退避
    let remember_me = req.remember_me;

    let input = LoginInput {
        email: req.email,
        password: req.password,
        remember_me,
    };

    let output = use_case.execute(input, origin).await?;

    // Success - set session cookie (Max-Age must match the token TTL)
    let cookie = build_session_cookie(&state.config, &output.token, output.lifetime);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            token: output.token,
            user: UserDto::from(&output.user),
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Always succeeds, even when no matching session exists, and always
/// clears the cookie.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    if let Some(token) = extract_token(&headers, &state.config.session_cookie_name) {
        let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());
        // Store trouble does not break logout for the caller
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Logout revocation failed");
        }
    }

    let cookie = build_clear_cookie(&state.config);

    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)])
}

// ============================================================================
// Who am I
// ============================================================================

/// GET /api/auth/me
///
/// Strong-path check: a revoked session answers unauthenticated even
/// though its token signature still verifies.
pub async fn me<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let Some(token) = extract_token(&headers, &state.config.session_cookie_name) else {
        return unauthenticated();
    };

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let claims = match use_case.verify_live(&token).await {
        Ok(claims) => claims,
        Err(e @ AuthError::StoreUnavailable) => return e.into_response(),
        Err(_) => return unauthenticated(),
    };

    match state.repo.find_by_id(&UserId::from_uuid(claims.sub)).await {
        Ok(Some(user)) => Json(MeResponse {
            authenticated: true,
            user: Some(UserDto::from(&user)),
        })
        .into_response(),
        Ok(None) => unauthenticated(),
        Err(e) => e.into_response(),
    }
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(MeResponse {
            authenticated: false,
            user: None,
        }),
    )
        .into_response()
}

// ============================================================================
// Registration
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            email: req.email,
            user_name: req.username,
            password: req.password,
            full_name: req.full_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(&user))))
}

// ============================================================================
// Admin user management (behind the auth gate)
// ============================================================================

/// GET /admin/api/users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<AdminUserDto>>>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let use_case =
        ManageUsersUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let users = use_case.list().await?;
    Ok(Json(users.iter().map(AdminUserDto::from).collect()))
}

/// POST /admin/api/users
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let role = parse_role(&req.role)?;

    let use_case =
        ManageUsersUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let user = use_case
        .create(CreateUserInput {
            email: req.email,
            user_name: req.username,
            password: req.password,
            full_name: req.full_name,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AdminUserDto::from(&user))))
}

/// PUT /admin/api/users/{id}
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    axum::Extension(identity): axum::Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> AuthResult<Json<AdminUserDto>>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };

    let input = UpdateUserInput {
        role: req.role.as_deref().map(parse_role).transpose()?,
        status: req.status.as_deref().map(parse_status).transpose()?,
        full_name: req.full_name,
    };

    let use_case =
        ManageUsersUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let user = use_case
        .update(&actor, &UserId::from_uuid(id), input)
        .await?;

    Ok(Json(AdminUserDto::from(&user)))
}

/// DELETE /admin/api/users/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    axum::Extension(identity): axum::Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };

    let use_case =
        ManageUsersUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    use_case.delete(&actor, &UserId::from_uuid(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Normalize a role code at the boundary; unknown codes are rejected,
/// never guessed.
fn parse_role(code: &str) -> AuthResult<UserRole> {
    UserRole::from_code(code)
        .ok_or_else(|| AuthError::Validation(format!("Unknown role: {code}")))
}

fn parse_status(code: &str) -> AuthResult<UserStatus> {
    UserStatus::from_code(code)
        .ok_or_else(|| AuthError::Validation(format!("Unknown status: {code}")))
}

fn build_session_cookie(config: &AuthConfig, token: &str, lifetime: TokenLifetime) -> String {
    let max_age = config.ttl_for(lifetime).as_secs() as i64;
    config.cookie_config(Some(max_age)).build_set_cookie(token)
}

fn build_clear_cookie(config: &AuthConfig) -> String {
    config.cookie_config(None).build_delete_cookie()
}
