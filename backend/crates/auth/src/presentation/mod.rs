//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the auth gate middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    AuthGateState, AuthenticatedUser, Deny, LiveSessionState, admin_gate, extract_token,
    require_live_session,
};
pub use router::{admin_user_router, auth_router, auth_router_generic};
