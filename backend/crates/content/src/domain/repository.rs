//! Repository Traits
//!
//! The collaborator contracts the auth gate fronts. Handlers receive
//! verified identity from the gate and never re-check tokens themselves.

use kernel::id::{ArticleId, EventId, GalleryItemId};

use crate::domain::entities::{
    Article, ContactMessage, Event, EventRegistration, GalleryItem,
};
use crate::error::ContentResult;

/// Article store
#[trait_variant::make(ArticleRepository: Send)]
pub trait LocalArticleRepository {
    async fn create(&self, article: &Article) -> ContentResult<()>;

    async fn find_by_id(&self, article_id: &ArticleId) -> ContentResult<Option<Article>>;

    async fn find_by_slug(&self, slug: &str) -> ContentResult<Option<Article>>;

    async fn exists_by_slug(&self, slug: &str) -> ContentResult<bool>;

    /// Published articles, newest first
    async fn list_published(&self) -> ContentResult<Vec<Article>>;

    /// Every article, drafts included (admin listing)
    async fn list_all(&self) -> ContentResult<Vec<Article>>;

    async fn update(&self, article: &Article) -> ContentResult<()>;

    async fn delete(&self, article_id: &ArticleId) -> ContentResult<()>;
}

/// Event store, including registrations
#[trait_variant::make(EventRepository: Send)]
pub trait LocalEventRepository {
    async fn create(&self, event: &Event) -> ContentResult<()>;

    async fn find_by_id(&self, event_id: &EventId) -> ContentResult<Option<Event>>;

    /// Upcoming events, soonest first
    async fn list_upcoming(&self) -> ContentResult<Vec<Event>>;

    async fn list_all(&self) -> ContentResult<Vec<Event>>;

    async fn update(&self, event: &Event) -> ContentResult<()>;

    async fn delete(&self, event_id: &EventId) -> ContentResult<()>;

    async fn add_registration(&self, registration: &EventRegistration) -> ContentResult<()>;

    async fn count_registrations(&self, event_id: &EventId) -> ContentResult<i64>;
}

/// Gallery store
#[trait_variant::make(GalleryRepository: Send)]
pub trait LocalGalleryRepository {
    async fn create(&self, item: &GalleryItem) -> ContentResult<()>;

    /// Items by sort order
    async fn list(&self) -> ContentResult<Vec<GalleryItem>>;

    async fn delete(&self, item_id: &GalleryItemId) -> ContentResult<()>;
}

/// Contact message store
#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    async fn save(&self, message: &ContactMessage) -> ContentResult<()>;
}
