//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod notifier;
pub mod router;

pub use handlers::{AdminContentState, PublicContentState};
pub use notifier::{ContactNotifier, TracingNotifier};
pub use router::{admin_content_router, public_content_router};
