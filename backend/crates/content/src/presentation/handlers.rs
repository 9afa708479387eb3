//! HTTP Handlers
//!
//! Public handlers serve the marketing site; admin handlers sit behind
//! the auth gate and read the identity it injected (`X-Auth-User-Id`) -
//! they never re-parse tokens themselves.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, EventId, GalleryItemId};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Article, ContactMessage, Event, EventRegistration, GalleryItem};
use crate::domain::repository::{
    ArticleRepository, ContactRepository, EventRepository, GalleryRepository,
};
use crate::error::{ContentError, ContentResult};
use crate::presentation::dto::{
    ArticleDto, ContactRequest, CreateArticleRequest, CreateEventRequest,
    CreateGalleryItemRequest, EventDto, GalleryItemDto, RegisterAttendeeRequest,
    UpdateArticleRequest, UpdateEventRequest,
};
use crate::presentation::notifier::ContactNotifier;

/// Bound shared by every content repository implementation
pub trait ContentRepo:
    ArticleRepository + EventRepository + GalleryRepository + ContactRepository + Send + Sync + 'static
{
}

impl<T> ContentRepo for T where
    T: ArticleRepository
        + EventRepository
        + GalleryRepository
        + ContactRepository
        + Send
        + Sync
        + 'static
{
}

/// State for the public content surface
pub struct PublicContentState<R, N>
where
    R: ContentRepo,
    N: ContactNotifier + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
}

impl<R, N> Clone for PublicContentState<R, N>
where
    R: ContentRepo,
    N: ContactNotifier + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

/// State for the gated admin surface
pub struct AdminContentState<R>
where
    R: ContentRepo,
{
    pub repo: Arc<R>,
}

impl<R> Clone for AdminContentState<R>
where
    R: ContentRepo,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Public: Articles
// ============================================================================

/// GET /api/articles
pub async fn list_articles<R, N>(
    State(state): State<PublicContentState<R, N>>,
) -> ContentResult<Json<Vec<ArticleDto>>>
where
    R: ContentRepo,
    N: ContactNotifier + Send + Sync + 'static,
{
    let articles = state.repo.list_published().await?;
    Ok(Json(articles.iter().map(ArticleDto::from).collect()))
}

/// GET /api/articles/{slug}
pub async fn get_article<R, N>(
    State(state): State<PublicContentState<R, N>>,
    Path(slug): Path<String>,
) -> ContentResult<Json<ArticleDto>>
where
    R: ContentRepo,
    N: ContactNotifier + Send + Sync + 'static,
{
    let article = state
        .repo
        .find_by_slug(&slug)
        .await?
        .filter(|a| a.published)
        .ok_or(ContentError::NotFound)?;

    Ok(Json(ArticleDto::from(&article)))
}

// ============================================================================
// Public: Events
// ============================================================================

/// GET /api/events
pub async fn list_events<R, N>(
    State(state): State<PublicContentState<R, N>>,
) -> ContentResult<Json<Vec<EventDto>>>
where
    R: ContentRepo,
    N: ContactNotifier + Send + Sync + 'static,
{
    let events = state.repo.list_upcoming().await?;
    Ok(Json(events.iter().map(EventDto::from).collect()))
}

/// POST /api/events/{id}/register
pub async fn register_attendee<R, N>(
    State(state): State<PublicContentState<R, N>>,
    Path(id): Path<Uuid>,
    Json(req): Json<RegisterAttendeeRequest>,
) -> ContentResult<StatusCode>
where
    R: ContentRepo,
    N: ContactNotifier + Send + Sync + 'static,
{
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ContentError::Validation("Name is required".into()));
    }
    let email = req.email.trim().to_ascii_lowercase();
    if !email.contains('@') {
        return Err(ContentError::Validation("Email is invalid".into()));
    }

    let event_id = EventId::from_uuid(id);
    let event = EventRepository::find_by_id(state.repo.as_ref(), &event_id)
        .await?
        .ok_or(ContentError::NotFound)?;

    if let Some(capacity) = event.capacity {
        let registered = state.repo.count_registrations(&event_id).await?;
        if registered >= capacity as i64 {
            return Err(ContentError::EventFull);
        }
    }

    let registration = EventRegistration::new(event_id, name.to_string(), email);
    state.repo.add_registration(&registration).await?;

    tracing::info!(
        event_id = %event.event_id,
        registration_id = %registration.registration_id,
        "Attendee registered"
    );

    Ok(StatusCode::CREATED)
}

// ============================================================================
// Public: Gallery
// ============================================================================

/// GET /api/gallery
pub async fn list_gallery<R, N>(
    State(state): State<PublicContentState<R, N>>,
) -> ContentResult<Json<Vec<GalleryItemDto>>>
where
    R: ContentRepo,
    N: ContactNotifier + Send + Sync + 'static,
{
    let items = GalleryRepository::list(state.repo.as_ref()).await?;
    Ok(Json(items.iter().map(GalleryItemDto::from).collect()))
}

// ============================================================================
// Public: Contact
// ============================================================================

/// POST /api/contact
pub async fn submit_contact<R, N>(
    State(state): State<PublicContentState<R, N>>,
    Json(req): Json<ContactRequest>,
) -> ContentResult<StatusCode>
where
    R: ContentRepo,
    N: ContactNotifier + Send + Sync + 'static,
{
    let name = req.name.trim();
    let body = req.message.trim();
    if name.is_empty() || body.is_empty() {
        return Err(ContentError::Validation("Name and message are required".into()));
    }
    let email = req.email.trim().to_ascii_lowercase();
    if !email.contains('@') {
        return Err(ContentError::Validation("Email is invalid".into()));
    }

    let message = ContactMessage::new(name.to_string(), email, body.to_string());
    state.repo.save(&message).await?;

    // Notification failure is not the sender's problem
    if let Err(e) = state.notifier.notify(&message).await {
        tracing::warn!(error = %e, "Contact notification failed");
    }

    Ok(StatusCode::ACCEPTED)
}

// ============================================================================
// Admin: Articles
// ============================================================================

/// Identity attached by the auth gate
fn gated_author_id(headers: &HeaderMap) -> ContentResult<Uuid> {
    headers
        .get("x-auth-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| ContentError::Internal("Identity missing; is the auth gate mounted?".into()))
}

/// GET /admin/api/articles
pub async fn admin_list_articles<R>(
    State(state): State<AdminContentState<R>>,
) -> ContentResult<Json<Vec<ArticleDto>>>
where
    R: ContentRepo,
{
    let articles = ArticleRepository::list_all(state.repo.as_ref()).await?;
    Ok(Json(articles.iter().map(ArticleDto::from).collect()))
}

/// POST /admin/api/articles
pub async fn create_article<R>(
    State(state): State<AdminContentState<R>>,
    headers: HeaderMap,
    Json(req): Json<CreateArticleRequest>,
) -> ContentResult<impl IntoResponse>
where
    R: ContentRepo,
{
    let author_id = gated_author_id(&headers)?;

    let slug = req.slug.trim().to_ascii_lowercase();
    if slug.is_empty() {
        return Err(ContentError::Validation("Slug is required".into()));
    }
    if state.repo.exists_by_slug(&slug).await? {
        return Err(ContentError::SlugTaken);
    }

    let mut article = Article::new(slug, req.title, req.body, author_id);
    article.excerpt = req.excerpt;
    article.cover_image = req.cover_image;
    if req.published {
        article.publish();
    }

    ArticleRepository::create(state.repo.as_ref(), &article).await?;

    tracing::info!(article_id = %article.article_id, slug = %article.slug, "Article created");

    Ok((StatusCode::CREATED, Json(ArticleDto::from(&article))))
}

/// PUT /admin/api/articles/{id}
pub async fn update_article<R>(
    State(state): State<AdminContentState<R>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateArticleRequest>,
) -> ContentResult<Json<ArticleDto>>
where
    R: ContentRepo,
{
    let article_id = ArticleId::from_uuid(id);
    let mut article = ArticleRepository::find_by_id(state.repo.as_ref(), &article_id)
        .await?
        .ok_or(ContentError::NotFound)?;

    if let Some(title) = req.title {
        article.title = title;
    }
    if let Some(body) = req.body {
        article.body = body;
    }
    if let Some(excerpt) = req.excerpt {
        article.excerpt = Some(excerpt);
    }
    if let Some(cover_image) = req.cover_image {
        article.cover_image = Some(cover_image);
    }
    match req.published {
        Some(true) => article.publish(),
        Some(false) => article.unpublish(),
        None => article.updated_at = Utc::now(),
    }

    ArticleRepository::update(state.repo.as_ref(), &article).await?;

    Ok(Json(ArticleDto::from(&article)))
}

/// DELETE /admin/api/articles/{id}
pub async fn delete_article<R>(
    State(state): State<AdminContentState<R>>,
    Path(id): Path<Uuid>,
) -> ContentResult<StatusCode>
where
    R: ContentRepo,
{
    let article_id = ArticleId::from_uuid(id);
    ArticleRepository::find_by_id(state.repo.as_ref(), &article_id)
        .await?
        .ok_or(ContentError::NotFound)?;

    ArticleRepository::delete(state.repo.as_ref(), &article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Admin: Events
// ============================================================================

/// GET /admin/api/events
pub async fn admin_list_events<R>(
    State(state): State<AdminContentState<R>>,
) -> ContentResult<Json<Vec<EventDto>>>
where
    R: ContentRepo,
{
    let events = EventRepository::list_all(state.repo.as_ref()).await?;
    Ok(Json(events.iter().map(EventDto::from).collect()))
}

/// POST /admin/api/events
pub async fn create_event<R>(
    State(state): State<AdminContentState<R>>,
    Json(req): Json<CreateEventRequest>,
) -> ContentResult<impl IntoResponse>
where
    R: ContentRepo,
{
    let starts_at = timestamp_ms(req.starts_at)?;

    let mut event = Event::new(req.title, req.description, starts_at);
    event.location = req.location;
    event.ends_at = req.ends_at.map(timestamp_ms).transpose()?;
    event.capacity = req.capacity;

    EventRepository::create(state.repo.as_ref(), &event).await?;

    tracing::info!(event_id = %event.event_id, "Event created");

    Ok((StatusCode::CREATED, Json(EventDto::from(&event))))
}

/// PUT /admin/api/events/{id}
pub async fn update_event<R>(
    State(state): State<AdminContentState<R>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> ContentResult<Json<EventDto>>
where
    R: ContentRepo,
{
    let event_id = EventId::from_uuid(id);
    let mut event = EventRepository::find_by_id(state.repo.as_ref(), &event_id)
        .await?
        .ok_or(ContentError::NotFound)?;

    if let Some(title) = req.title {
        event.title = title;
    }
    if let Some(description) = req.description {
        event.description = description;
    }
    if let Some(location) = req.location {
        event.location = Some(location);
    }
    if let Some(starts_at) = req.starts_at {
        event.starts_at = timestamp_ms(starts_at)?;
    }
    if let Some(ends_at) = req.ends_at {
        event.ends_at = Some(timestamp_ms(ends_at)?);
    }
    if let Some(capacity) = req.capacity {
        event.capacity = Some(capacity);
    }
    event.updated_at = Utc::now();

    EventRepository::update(state.repo.as_ref(), &event).await?;

    Ok(Json(EventDto::from(&event)))
}

/// DELETE /admin/api/events/{id}
pub async fn delete_event<R>(
    State(state): State<AdminContentState<R>>,
    Path(id): Path<Uuid>,
) -> ContentResult<StatusCode>
where
    R: ContentRepo,
{
    let event_id = EventId::from_uuid(id);
    EventRepository::find_by_id(state.repo.as_ref(), &event_id)
        .await?
        .ok_or(ContentError::NotFound)?;

    EventRepository::delete(state.repo.as_ref(), &event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Admin: Gallery
// ============================================================================

/// GET /admin/api/gallery
pub async fn admin_list_gallery<R>(
    State(state): State<AdminContentState<R>>,
) -> ContentResult<Json<Vec<GalleryItemDto>>>
where
    R: ContentRepo,
{
    let items = GalleryRepository::list(state.repo.as_ref()).await?;
    Ok(Json(items.iter().map(GalleryItemDto::from).collect()))
}

/// POST /admin/api/gallery
pub async fn create_gallery_item<R>(
    State(state): State<AdminContentState<R>>,
    Json(req): Json<CreateGalleryItemRequest>,
) -> ContentResult<impl IntoResponse>
where
    R: ContentRepo,
{
    if req.image_path.trim().is_empty() {
        return Err(ContentError::Validation("Image path is required".into()));
    }

    let mut item = GalleryItem::new(req.title, req.image_path, req.sort_order);
    item.caption = req.caption;

    GalleryRepository::create(state.repo.as_ref(), &item).await?;

    Ok((StatusCode::CREATED, Json(GalleryItemDto::from(&item))))
}

/// DELETE /admin/api/gallery/{id}
pub async fn delete_gallery_item<R>(
    State(state): State<AdminContentState<R>>,
    Path(id): Path<Uuid>,
) -> ContentResult<StatusCode>
where
    R: ContentRepo,
{
    GalleryRepository::delete(state.repo.as_ref(), &GalleryItemId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn timestamp_ms(ms: i64) -> ContentResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| ContentError::Validation("Timestamp out of range".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::router::public_content_router;
    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    #[derive(Default)]
    struct MemoryContent {
        articles: Mutex<Vec<Article>>,
        events: Mutex<Vec<Event>>,
        registrations: Mutex<Vec<EventRegistration>>,
        gallery: Mutex<Vec<GalleryItem>>,
        messages: Mutex<Vec<ContactMessage>>,
    }

    impl ArticleRepository for MemoryContent {
        async fn create(&self, article: &Article) -> ContentResult<()> {
            self.articles.lock().unwrap().push(article.clone());
            Ok(())
        }

        async fn find_by_id(&self, article_id: &ArticleId) -> ContentResult<Option<Article>> {
            Ok(self
                .articles
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.article_id == *article_id)
                .cloned())
        }

        async fn find_by_slug(&self, slug: &str) -> ContentResult<Option<Article>> {
            Ok(self
                .articles
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.slug == slug)
                .cloned())
        }

        async fn exists_by_slug(&self, slug: &str) -> ContentResult<bool> {
            Ok(self.articles.lock().unwrap().iter().any(|a| a.slug == slug))
        }

        async fn list_published(&self) -> ContentResult<Vec<Article>> {
            Ok(self
                .articles
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.published)
                .cloned()
                .collect())
        }

        async fn list_all(&self) -> ContentResult<Vec<Article>> {
            Ok(self.articles.lock().unwrap().clone())
        }

        async fn update(&self, article: &Article) -> ContentResult<()> {
            let mut articles = self.articles.lock().unwrap();
            if let Some(slot) = articles.iter_mut().find(|a| a.article_id == article.article_id) {
                *slot = article.clone();
            }
            Ok(())
        }

        async fn delete(&self, article_id: &ArticleId) -> ContentResult<()> {
            self.articles
                .lock()
                .unwrap()
                .retain(|a| a.article_id != *article_id);
            Ok(())
        }
    }

    impl EventRepository for MemoryContent {
        async fn create(&self, event: &Event) -> ContentResult<()> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn find_by_id(&self, event_id: &EventId) -> ContentResult<Option<Event>> {
            Ok(self
                .events
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.event_id == *event_id)
                .cloned())
        }

        async fn list_upcoming(&self) -> ContentResult<Vec<Event>> {
            Ok(self
                .events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.is_upcoming())
                .cloned()
                .collect())
        }

        async fn list_all(&self) -> ContentResult<Vec<Event>> {
            Ok(self.events.lock().unwrap().clone())
        }

        async fn update(&self, event: &Event) -> ContentResult<()> {
            let mut events = self.events.lock().unwrap();
            if let Some(slot) = events.iter_mut().find(|e| e.event_id == event.event_id) {
                *slot = event.clone();
            }
            Ok(())
        }

        async fn delete(&self, event_id: &EventId) -> ContentResult<()> {
            self.events.lock().unwrap().retain(|e| e.event_id != *event_id);
            Ok(())
        }

        async fn add_registration(&self, registration: &EventRegistration) -> ContentResult<()> {
            self.registrations.lock().unwrap().push(registration.clone());
            Ok(())
        }

        async fn count_registrations(&self, event_id: &EventId) -> ContentResult<i64> {
            Ok(self
                .registrations
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.event_id == *event_id)
                .count() as i64)
        }
    }

    impl GalleryRepository for MemoryContent {
        async fn create(&self, item: &GalleryItem) -> ContentResult<()> {
            self.gallery.lock().unwrap().push(item.clone());
            Ok(())
        }

        async fn list(&self) -> ContentResult<Vec<GalleryItem>> {
            Ok(self.gallery.lock().unwrap().clone())
        }

        async fn delete(&self, item_id: &GalleryItemId) -> ContentResult<()> {
            self.gallery.lock().unwrap().retain(|i| i.item_id != *item_id);
            Ok(())
        }
    }

    impl ContactRepository for MemoryContent {
        async fn save(&self, message: &ContactMessage) -> ContentResult<()> {
            self.messages.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingNotifier(AtomicUsize);

    impl ContactNotifier for CountingNotifier {
        async fn notify(&self, _message: &ContactMessage) -> ContentResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn json_request(method: Method, path: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_drafts_are_invisible_on_the_public_surface() {
        let repo = Arc::new(MemoryContent::default());
        let mut published = Article::new(
            "launch".into(),
            "Launch".into(),
            "We launched.".into(),
            Uuid::new_v4(),
        );
        published.publish();
        let draft = Article::new("wip".into(), "WIP".into(), "Soon.".into(), Uuid::new_v4());
        repo.articles.lock().unwrap().push(published);
        repo.articles.lock().unwrap().push(draft);

        let app = public_content_router(repo, Arc::new(CountingNotifier::default()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/articles/launch")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/articles/wip")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_registration_respects_capacity() {
        let repo = Arc::new(MemoryContent::default());
        let mut event = Event::new(
            "Open day".into(),
            "Visit us".into(),
            Utc::now() + chrono::Duration::days(7),
        );
        event.capacity = Some(1);
        let event_id = *event.event_id.as_uuid();
        repo.events.lock().unwrap().push(event);

        let app = public_content_router(repo.clone(), Arc::new(CountingNotifier::default()));

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                &format!("/events/{event_id}/register"),
                serde_json::json!({"name": "Alice", "email": "alice@example.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request(
                Method::POST,
                &format!("/events/{event_id}/register"),
                serde_json::json!({"name": "Bob", "email": "bob@example.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(repo.registrations.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_contact_is_stored_and_notified() {
        let repo = Arc::new(MemoryContent::default());
        let notifier = Arc::new(CountingNotifier::default());
        let app = public_content_router(repo.clone(), notifier.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/contact",
                serde_json::json!({
                    "name": "Alice",
                    "email": "Alice@Example.com",
                    "message": "Hello there",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(repo.messages.lock().unwrap().len(), 1);
        assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
        assert_eq!(
            repo.messages.lock().unwrap()[0].sender_email,
            "alice@example.com"
        );

        // Bad email is rejected before anything is stored
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/contact",
                serde_json::json!({"name": "X", "email": "nope", "message": "hi"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(repo.messages.lock().unwrap().len(), 1);
    }
}
