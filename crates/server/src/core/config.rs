//! Blog server configuration

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use crate::core::auth::AuthManager;
use crate::core::store::BlogStore;

/// Configuration for the blog server, resolved once at startup.
#[derive(Clone, Debug)]
pub struct BlogConfig {
    /// Path to the SQLite database file (created if missing)
    pub database_path: PathBuf,
    /// Secret key used to sign session cookies
    pub secret_key: String,
    /// Listen address
    pub bind_addr: SocketAddr,
}

impl BlogConfig {
    /// Read configuration from the environment.
    ///
    /// `DATABASE_URL` and `SECRET_KEY` are required; `BIND_ADDR` defaults
    /// to `0.0.0.0:3001`.
    pub fn from_env() -> anyhow::Result<Self> {
        let database = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let database_path = PathBuf::from(
            database
                .strip_prefix("sqlite:")
                .unwrap_or(database.as_str()),
        );

        let secret_key = env::var("SECRET_KEY").context("SECRET_KEY is not set")?;
        if secret_key.trim().is_empty() {
            anyhow::bail!("SECRET_KEY must not be empty");
        }

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(addr) => addr
                .parse()
                .context("BIND_ADDR is not a valid socket address")?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 3001)),
        };

        Ok(Self {
            database_path,
            secret_key,
            bind_addr,
        })
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: BlogConfig,
    pub store: Arc<BlogStore>,
    pub auth: Arc<AuthManager>,
}
