//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Article, Event, GalleryItem};

// ============================================================================
// Articles
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published: bool,
    pub author_id: String,
    pub published_at: Option<i64>,
    pub created_at: i64,
}

impl From<&Article> for ArticleDto {
    fn from(article: &Article) -> Self {
        Self {
            id: article.article_id.to_string(),
            slug: article.slug.clone(),
            title: article.title.clone(),
            body: article.body.clone(),
            excerpt: article.excerpt.clone(),
            cover_image: article.cover_image.clone(),
            published: article.published,
            author_id: article.author_id.to_string(),
            published_at: article.published_at.map(|t| t.timestamp_millis()),
            created_at: article.created_at.timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published: Option<bool>,
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: i64,
    pub ends_at: Option<i64>,
    pub capacity: Option<i32>,
}

impl From<&Event> for EventDto {
    fn from(event: &Event) -> Self {
        Self {
            id: event.event_id.to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            starts_at: event.starts_at.timestamp_millis(),
            ends_at: event.ends_at.map(|t| t.timestamp_millis()),
            capacity: event.capacity,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    /// Unix timestamp in milliseconds
    pub starts_at: i64,
    pub ends_at: Option<i64>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    pub capacity: Option<i32>,
}

/// Public event registration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAttendeeRequest {
    pub name: String,
    pub email: String,
}

// ============================================================================
// Gallery
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItemDto {
    pub id: String,
    pub title: String,
    pub caption: Option<String>,
    pub image_path: String,
    pub sort_order: i32,
}

impl From<&GalleryItem> for GalleryItemDto {
    fn from(item: &GalleryItem) -> Self {
        Self {
            id: item.item_id.to_string(),
            title: item.title.clone(),
            caption: item.caption.clone(),
            image_path: item.image_path.clone(),
            sort_order: item.sort_order,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryItemRequest {
    pub title: String,
    pub caption: Option<String>,
    pub image_path: String,
    #[serde(default)]
    pub sort_order: i32,
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}
