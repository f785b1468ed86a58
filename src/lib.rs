//! Client for a social feed REST API: sessions, posts, profiles and follows,
//! plus the page controllers and views that sit on top of it.

pub mod core {
    pub mod errors;
    pub mod helpers;
    pub mod query_params;
    pub mod storage;
}

pub mod models {
    pub mod models;
}

pub mod auth;
pub mod client;
pub mod config;
pub mod dialog;
pub mod follow;
pub mod pages;
pub mod posts;
pub mod session;
pub mod templates;
pub mod users;
pub mod views;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use crate::core::errors::ClientError;
pub use crate::core::storage::{FileStore, KeyValueStore, MemoryStore};
pub use dialog::Dialog;
pub use models::models::{Envelope, Media, Post, PostDraft, Profile, Session, User};
pub use posts::Deletion;
pub use session::SessionStore;
