//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, EventId, GalleryItemId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{
    Article, ContactMessage, Event, EventRegistration, GalleryItem,
};
use crate::domain::repository::{
    ArticleRepository, ContactRepository, EventRepository, GalleryRepository,
};
use crate::error::ContentResult;

/// PostgreSQL-backed content repository
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Article Repository Implementation
// ============================================================================

impl ArticleRepository for PgContentRepository {
    async fn create(&self, article: &Article) -> ContentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO articles (
                article_id, slug, title, body, excerpt, cover_image,
                published, author_id, published_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(article.article_id.as_uuid())
        .bind(&article.slug)
        .bind(&article.title)
        .bind(&article.body)
        .bind(&article.excerpt)
        .bind(&article.cover_image)
        .bind(article.published)
        .bind(article.author_id)
        .bind(article.published_at)
        .bind(article.created_at)
        .bind(article.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, article_id: &ArticleId) -> ContentResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT * FROM articles WHERE article_id = $1",
        )
        .bind(article_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_article()))
    }

    async fn find_by_slug(&self, slug: &str) -> ContentResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>("SELECT * FROM articles WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_article()))
    }

    async fn exists_by_slug(&self, slug: &str) -> ContentResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM articles WHERE slug = $1)",
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_published(&self) -> ContentResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            "SELECT * FROM articles WHERE published ORDER BY published_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_article()).collect())
    }

    async fn list_all(&self) -> ContentResult<Vec<Article>> {
        let rows =
            sqlx::query_as::<_, ArticleRow>("SELECT * FROM articles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|r| r.into_article()).collect())
    }

    async fn update(&self, article: &Article) -> ContentResult<()> {
        sqlx::query(
            r#"
            UPDATE articles SET
                slug = $2, title = $3, body = $4, excerpt = $5,
                cover_image = $6, published = $7, published_at = $8,
                updated_at = $9
            WHERE article_id = $1
            "#,
        )
        .bind(article.article_id.as_uuid())
        .bind(&article.slug)
        .bind(&article.title)
        .bind(&article.body)
        .bind(&article.excerpt)
        .bind(&article.cover_image)
        .bind(article.published)
        .bind(article.published_at)
        .bind(article.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, article_id: &ArticleId) -> ContentResult<()> {
        sqlx::query("DELETE FROM articles WHERE article_id = $1")
            .bind(article_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Event Repository Implementation
// ============================================================================

impl EventRepository for PgContentRepository {
    async fn create(&self, event: &Event) -> ContentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO events (
                event_id, title, description, location, starts_at, ends_at,
                capacity, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(event.event_id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.capacity)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, event_id: &EventId) -> ContentResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>("SELECT * FROM events WHERE event_id = $1")
            .bind(event_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_event()))
    }

    async fn list_upcoming(&self) -> ContentResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT * FROM events WHERE starts_at > $1 ORDER BY starts_at ASC",
        )
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_event()).collect())
    }

    async fn list_all(&self) -> ContentResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>("SELECT * FROM events ORDER BY starts_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_event()).collect())
    }

    async fn update(&self, event: &Event) -> ContentResult<()> {
        sqlx::query(
            r#"
            UPDATE events SET
                title = $2, description = $3, location = $4, starts_at = $5,
                ends_at = $6, capacity = $7, updated_at = $8
            WHERE event_id = $1
            "#,
        )
        .bind(event.event_id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.capacity)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, event_id: &EventId) -> ContentResult<()> {
        sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn add_registration(&self, registration: &EventRegistration) -> ContentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO event_registrations (
                registration_id, event_id, attendee_name, attendee_email, created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(registration.registration_id.as_uuid())
        .bind(registration.event_id.as_uuid())
        .bind(&registration.attendee_name)
        .bind(&registration.attendee_email)
        .bind(registration.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count_registrations(&self, event_id: &EventId) -> ContentResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM event_registrations WHERE event_id = $1",
        )
        .bind(event_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

// ============================================================================
// Gallery Repository Implementation
// ============================================================================

impl GalleryRepository for PgContentRepository {
    async fn create(&self, item: &GalleryItem) -> ContentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO gallery_items (
                item_id, title, caption, image_path, sort_order, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.item_id.as_uuid())
        .bind(&item.title)
        .bind(&item.caption)
        .bind(&item.image_path)
        .bind(item.sort_order)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> ContentResult<Vec<GalleryItem>> {
        let rows = sqlx::query_as::<_, GalleryItemRow>(
            "SELECT * FROM gallery_items ORDER BY sort_order ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_item()).collect())
    }

    async fn delete(&self, item_id: &GalleryItemId) -> ContentResult<()> {
        sqlx::query("DELETE FROM gallery_items WHERE item_id = $1")
            .bind(item_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Contact Repository Implementation
// ============================================================================

impl ContactRepository for PgContentRepository {
    async fn save(&self, message: &ContactMessage) -> ContentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_messages (
                message_id, sender_name, sender_email, body, created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.message_id.as_uuid())
        .bind(&message.sender_name)
        .bind(&message.sender_email)
        .bind(&message.body)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ArticleRow {
    article_id: Uuid,
    slug: String,
    title: String,
    body: String,
    excerpt: Option<String>,
    cover_image: Option<String>,
    published: bool,
    author_id: Uuid,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ArticleRow {
    fn into_article(self) -> Article {
        Article {
            article_id: ArticleId::from_uuid(self.article_id),
            slug: self.slug,
            title: self.title,
            body: self.body,
            excerpt: self.excerpt,
            cover_image: self.cover_image,
            published: self.published,
            author_id: self.author_id,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    event_id: Uuid,
    title: String,
    description: String,
    location: Option<String>,
    starts_at: DateTime<Utc>,
    ends_at: Option<DateTime<Utc>>,
    capacity: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EventRow {
    fn into_event(self) -> Event {
        Event {
            event_id: EventId::from_uuid(self.event_id),
            title: self.title,
            description: self.description,
            location: self.location,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            capacity: self.capacity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GalleryItemRow {
    item_id: Uuid,
    title: String,
    caption: Option<String>,
    image_path: String,
    sort_order: i32,
    created_at: DateTime<Utc>,
}

impl GalleryItemRow {
    fn into_item(self) -> GalleryItem {
        GalleryItem {
            item_id: GalleryItemId::from_uuid(self.item_id),
            title: self.title,
            caption: self.caption,
            image_path: self.image_path,
            sort_order: self.sort_order,
            created_at: self.created_at,
        }
    }
}
