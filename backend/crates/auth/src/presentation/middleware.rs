//! Auth Gate Middleware
//!
//! Intercepts every request to the protected admin surface and either
//! forwards it annotated with verified identity or terminates it with a
//! redirect. Per request the gate runs, strictly in order:
//!
//! 1. allow-list check (the login surface passes untouched)
//! 2. token extraction (cookie, else `Authorization: Bearer`)
//! 3. fast-path verification (signature + expiry, no store access)
//! 4. role policy
//! 5. forward, with identity attached as a request extension and
//!    `X-Auth-*` headers
//!
//! Terminal outcomes are redirects only; nothing here surfaces a 500.
//! A second middleware runs the strong path (session store liveness)
//! before privileged mutations.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::application::token::{Claims, TokenCodec, TokenError};
use crate::domain::policy;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::AuthError;

/// Verified identity attached to forwarded requests.
///
/// Downstream handlers trust this and never re-parse the token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: UserRole,
    pub email: String,
}

impl From<&Claims> for AuthenticatedUser {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: UserId::from_uuid(claims.sub),
            role: claims.role,
            email: claims.email.clone(),
        }
    }
}

/// Denial outcomes of the gate state machine
#[derive(Debug)]
pub enum Deny {
    /// No token presented
    NoToken,
    /// Token rejected by the codec; the client artifact gets cleared
    InvalidToken(TokenError),
    /// Token verified but the session row is revoked or expired
    Revoked,
    /// Credential was valid, privilege was not
    Forbidden,
    /// Session store unreachable on the strong path
    StoreUnavailable,
}

impl Deny {
    /// Map a denial to its user-visible response.
    ///
    /// Invalid credentials route back to login; valid-but-insufficient
    /// role routes to the distinct unauthorized surface. Store trouble
    /// behaves like a missing token but is logged loudly for operators.
    pub fn into_response(self, config: &AuthConfig) -> Response {
        match self {
            Deny::NoToken => Redirect::to(&config.login_path).into_response(),
            Deny::InvalidToken(e) => {
                tracing::debug!(error = %e, "Clearing rejected session token");
                redirect_clearing_cookie(config, &config.login_path)
            }
            Deny::Revoked => {
                tracing::debug!("Revoked session presented");
                redirect_clearing_cookie(config, &config.login_path)
            }
            Deny::Forbidden => Redirect::to(&config.unauthorized_path).into_response(),
            Deny::StoreUnavailable => {
                tracing::error!("Session store unavailable; failing closed to login");
                Redirect::to(&config.login_path).into_response()
            }
        }
    }
}

fn redirect_clearing_cookie(config: &AuthConfig, target: &str) -> Response {
    let mut response = Redirect::to(target).into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        platform::cookie::delete_cookie_header(&config.cookie_config(None)),
    );
    response
}

/// Read the token from the designated transports: session cookie first,
/// then `Authorization: Bearer`.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, cookie_name).or_else(|| bearer_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

// ============================================================================
// Fast gate
// ============================================================================

/// State for the fast (store-free) admin gate
#[derive(Clone)]
pub struct AuthGateState {
    pub config: Arc<AuthConfig>,
    /// Prefix of the protected surface
    pub protected_prefix: String,
    /// Role required by the gated surface
    pub required_role: UserRole,
    /// Exact paths inside the prefix that bypass the gate (the login
    /// surface itself)
    pub allow_list: Arc<Vec<String>>,
}

impl AuthGateState {
    /// Gate over `/admin` requiring the admin role, allow-listing the
    /// login path
    pub fn new(config: Arc<AuthConfig>) -> Self {
        let allow_list = Arc::new(vec![config.login_path.clone()]);
        Self {
            config,
            protected_prefix: "/admin".to_string(),
            required_role: UserRole::Admin,
            allow_list,
        }
    }
}

/// Path as the client sent it. Inside a nested router the request URI
/// has the nest prefix stripped; the original is carried in extensions.
fn request_path(req: &Request<Body>) -> String {
    req.extensions()
        .get::<axum::extract::OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

/// Whether `path` lies under `prefix` (segment-wise, so `/admin` does
/// not capture `/administrator`).
fn is_under(path: &str, prefix: &str) -> bool {
    path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}

/// Fast-path gate for the protected admin prefix.
///
/// Evaluation is a pure function of (request, current time, secret); no
/// store access and no shared mutable state across requests.
pub async fn admin_gate(
    State(state): State<AuthGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = request_path(&req);
    if !is_under(&path, &state.protected_prefix) {
        return next.run(req).await;
    }
    if state.allow_list.iter().any(|p| p == &path) {
        return next.run(req).await;
    }

    let identity = match evaluate_fast(&state, req.headers()) {
        Ok(identity) => identity,
        Err(deny) => return deny.into_response(&state.config),
    };

    attach_identity(&mut req, identity);
    next.run(req).await
}

fn evaluate_fast(state: &AuthGateState, headers: &HeaderMap) -> Result<AuthenticatedUser, Deny> {
    let token =
        extract_token(headers, &state.config.session_cookie_name).ok_or(Deny::NoToken)?;

    let codec = TokenCodec::new(state.config.clone());
    let claims = codec.verify_fast(&token).map_err(Deny::InvalidToken)?;

    if !policy::permits(claims.role, state.required_role) {
        return Err(Deny::Forbidden);
    }

    Ok(AuthenticatedUser::from(&claims))
}

/// Attach verified identity for downstream collaborators.
///
/// Headers are inserted, not appended, so a client-supplied `X-Auth-*`
/// value can never survive the gate.
fn attach_identity(req: &mut Request<Body>, identity: AuthenticatedUser) {
    let headers = req.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&identity.user_id.to_string()) {
        headers.insert("x-auth-user-id", value);
    }
    headers.insert("x-auth-role", HeaderValue::from_static(identity.role.code()));
    if let Ok(value) = HeaderValue::from_str(&identity.email) {
        headers.insert("x-auth-email", value);
    }
    req.extensions_mut().insert(identity);
}

// ============================================================================
// Strong gate (privileged mutations)
// ============================================================================

/// State for the strong-path middleware
pub struct LiveSessionState<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
    /// Prefix of the protected surface
    pub protected_prefix: String,
}

impl<S> LiveSessionState<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            sessions,
            config,
            protected_prefix: "/admin".to_string(),
        }
    }
}

impl<S> Clone for LiveSessionState<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
            protected_prefix: self.protected_prefix.clone(),
        }
    }
}

/// Strong-path check before privileged mutations.
///
/// Safe methods were already cleared by the fast gate and pass through;
/// mutating methods additionally require the session row to be live, so
/// logout actually revokes access. Store trouble and every unexpected
/// failure deny (fail closed), never hang and never 500.
pub async fn require_live_session<S>(
    State(state): State<LiveSessionState<S>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    S: SessionRepository + Send + Sync + 'static,
{
    if !is_under(&request_path(&req), &state.protected_prefix) {
        return next.run(req).await;
    }
    if matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return next.run(req).await;
    }

    let token = match extract_token(req.headers(), &state.config.session_cookie_name) {
        Some(token) => token,
        None => return Deny::NoToken.into_response(&state.config),
    };

    let use_case = CheckSessionUseCase::new(state.sessions.clone(), state.config.clone());

    match use_case.verify_live(&token).await {
        Ok(_) => next.run(req).await,
        Err(AuthError::StoreUnavailable) => Deny::StoreUnavailable.into_response(&state.config),
        Err(AuthError::Token(e)) => Deny::InvalidToken(e).into_response(&state.config),
        Err(AuthError::SessionInvalid) => Deny::Revoked.into_response(&state.config),
        Err(other) => {
            tracing::warn!(error = %other, "Unexpected auth gate failure; failing closed");
            Deny::NoToken.into_response(&state.config)
        }
    }
}
