//! Domain Layer

pub mod entities;
pub mod repository;

pub use entities::{Article, ContactMessage, Event, EventRegistration, GalleryItem};
pub use repository::{
    ArticleRepository, ContactRepository, EventRepository, GalleryRepository,
};
