//! Microblog Server Library
//!
//! Session-authenticated blog: registration, login/logout, and post
//! publishing, backed by SQLite.

pub mod core;
pub mod posts;

use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::core::auth::AuthManager;
use crate::core::store::BlogStore;
use crate::core::{AppState, BlogConfig};

pub async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Already set, ignore
    }

    info!("=== Microblog Server ===");

    let config = BlogConfig::from_env()?;
    info!("Database: {:?}", config.database_path);

    let store = Arc::new(BlogStore::open(&config.database_path).await?);
    info!("Store initialized");

    let auth = Arc::new(AuthManager::new(store.clone(), config.secret_key.clone()));
    info!("Auth Manager initialized");

    let bind_addr = config.bind_addr;
    let state = AppState {
        config,
        store,
        auth,
    };

    let app = crate::core::router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
