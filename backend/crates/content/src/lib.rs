//! Content Backend Module
//!
//! The marketing-site collaborators: article publishing, event
//! registration, photo gallery, and the contact form. Deliberately thin
//! CRUD over the content tables - the interesting trust boundary lives
//! in the `auth` crate, whose gate fronts the admin routers exported
//! here.
//!
//! Structure mirrors the auth crate:
//! - `domain/` - Entities and repository traits
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, routers

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{ContentError, ContentResult};
pub use infra::postgres::PgContentRepository;
pub use presentation::notifier::{ContactNotifier, TracingNotifier};
pub use presentation::router::{admin_content_router, public_content_router};
