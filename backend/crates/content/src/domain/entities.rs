//! Content Entities

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, ContactMessageId, EventId, GalleryItemId, RegistrationId};
use uuid::Uuid;

/// Published or draft article
#[derive(Debug, Clone)]
pub struct Article {
    pub article_id: ArticleId,
    /// URL slug, unique
    pub slug: String,
    pub title: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published: bool,
    /// Authoring admin (auth user id); identity comes from the gate
    pub author_id: Uuid,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn new(slug: String, title: String, body: String, author_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            article_id: ArticleId::new(),
            slug,
            title,
            body,
            excerpt: None,
            cover_image: None,
            published: false,
            author_id,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn publish(&mut self) {
        if !self.published {
            self.published = true;
            self.published_at = Some(Utc::now());
        }
        self.updated_at = Utc::now();
    }

    pub fn unpublish(&mut self) {
        self.published = false;
        self.updated_at = Utc::now();
    }
}

/// Company event with public registration
#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    /// Registration cap; `None` means unlimited
    pub capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(title: String, description: String, starts_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            event_id: EventId::new(),
            title,
            description,
            location: None,
            starts_at,
            ends_at: None,
            capacity: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_upcoming(&self) -> bool {
        self.starts_at > Utc::now()
    }
}

/// One attendee registration for an event
#[derive(Debug, Clone)]
pub struct EventRegistration {
    pub registration_id: RegistrationId,
    pub event_id: EventId,
    pub attendee_name: String,
    pub attendee_email: String,
    pub created_at: DateTime<Utc>,
}

impl EventRegistration {
    pub fn new(event_id: EventId, attendee_name: String, attendee_email: String) -> Self {
        Self {
            registration_id: RegistrationId::new(),
            event_id,
            attendee_name,
            attendee_email,
            created_at: Utc::now(),
        }
    }
}

/// Photo gallery item
#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub item_id: GalleryItemId,
    pub title: String,
    pub caption: Option<String>,
    pub image_path: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl GalleryItem {
    pub fn new(title: String, image_path: String, sort_order: i32) -> Self {
        Self {
            item_id: GalleryItemId::new(),
            title,
            caption: None,
            image_path,
            sort_order,
            created_at: Utc::now(),
        }
    }
}

/// Message from the public contact form
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub message_id: ContactMessageId,
    pub sender_name: String,
    pub sender_email: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(sender_name: String, sender_email: String, body: String) -> Self {
        Self {
            message_id: ContactMessageId::new(),
            sender_name,
            sender_email,
            body,
            created_at: Utc::now(),
        }
    }
}
