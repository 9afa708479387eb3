//! Content Routers

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::presentation::handlers::{
    self, AdminContentState, ContentRepo, PublicContentState,
};
use crate::presentation::notifier::ContactNotifier;

/// Public marketing-site routes (`/api`)
pub fn public_content_router<R, N>(repo: Arc<R>, notifier: Arc<N>) -> Router
where
    R: ContentRepo,
    N: ContactNotifier + Send + Sync + 'static,
{
    let state = PublicContentState { repo, notifier };

    Router::new()
        .route("/articles", get(handlers::list_articles::<R, N>))
        .route("/articles/{slug}", get(handlers::get_article::<R, N>))
        .route("/events", get(handlers::list_events::<R, N>))
        .route(
            "/events/{id}/register",
            post(handlers::register_attendee::<R, N>),
        )
        .route("/gallery", get(handlers::list_gallery::<R, N>))
        .route("/contact", post(handlers::submit_contact::<R, N>))
        .with_state(state)
}

/// Admin content routes (`/admin/api`).
///
/// Mount behind the auth gate; handlers trust the identity headers the
/// gate injected.
pub fn admin_content_router<R>(repo: Arc<R>) -> Router
where
    R: ContentRepo,
{
    let state = AdminContentState { repo };

    Router::new()
        .route(
            "/articles",
            get(handlers::admin_list_articles::<R>).post(handlers::create_article::<R>),
        )
        .route(
            "/articles/{id}",
            put(handlers::update_article::<R>).delete(handlers::delete_article::<R>),
        )
        .route(
            "/events",
            get(handlers::admin_list_events::<R>).post(handlers::create_event::<R>),
        )
        .route(
            "/events/{id}",
            put(handlers::update_event::<R>).delete(handlers::delete_event::<R>),
        )
        .route(
            "/gallery",
            get(handlers::admin_list_gallery::<R>).post(handlers::create_gallery_item::<R>),
        )
        .route(
            "/gallery/{id}",
            axum::routing::delete(handlers::delete_gallery_item::<R>),
        )
        .with_state(state)
}
