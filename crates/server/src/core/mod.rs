//! Core Service Layer
//!
//! Shared infrastructure for the blog server: authentication, data models,
//! configuration, storage, and page rendering.

pub mod auth;
pub mod config;
pub mod ctx;
pub mod error;
pub mod models;
pub mod pages;
pub mod router;
pub mod store;

// Re-exports for convenience
pub use config::{AppState, BlogConfig};
pub use ctx::Ctx;
pub use error::{Error, Result};
pub use router::router;
