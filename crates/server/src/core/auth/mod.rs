//! Authentication Module
//!
//! Handles registration, login, logout, and session management. Sessions
//! live in the store's sessions table with an in-memory cache in front;
//! the browser carries a signed `session=<token>.<sig>` cookie.

pub mod handlers;
pub mod middleware;
pub mod password;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::ctx::Ctx;
use crate::core::models::{RegisterForm, Session, User};
use crate::core::store::{BlogStore, StoreError};

/// Session lifetime in days
const SESSION_TTL_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("email already registered")]
    EmailTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<StoreError> for RegisterError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => RegisterError::EmailTaken,
            StoreError::Db(e) => RegisterError::Other(e.into()),
        }
    }
}

/// Auth manager: credential checks plus the session-to-user mapping
pub struct AuthManager {
    store: Arc<BlogStore>,
    secret_key: String,
    /// In-memory session cache; the sessions table is the source of truth
    sessions: RwLock<HashMap<String, Session>>,
}

impl AuthManager {
    pub fn new(store: Arc<BlogStore>, secret_key: String) -> Self {
        Self {
            store,
            secret_key,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new user. Form-level validation (empty fields, password
    /// confirmation) happens in the handler; this enforces email uniqueness
    /// and never stores the plaintext password.
    pub async fn register(&self, form: &RegisterForm) -> Result<User, RegisterError> {
        let password_hash = password::hash_password(&form.password)?;
        let user = self
            .store
            .create_user(&form.first_name, &form.last_name, &form.email, &password_hash)
            .await?;

        info!("[auth] user registered: {} (id {})", user.email, user.id);
        Ok(user)
    }

    /// Verify credentials and establish a session.
    ///
    /// `Ok(None)` means unknown email or wrong password; the caller shows
    /// the same generic message for both. `Err` is an infrastructure
    /// failure.
    pub async fn login(&self, email: &str, password: &str) -> anyhow::Result<Option<String>> {
        let Some(user) = self.store.user_by_email(email).await? else {
            return Ok(None);
        };

        if !password::verify_password(password, &user.password_hash)? {
            warn!("[auth] failed login attempt for {email}");
            return Ok(None);
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user.id,
            created_at: Utc::now(),
            expires_at: Utc::now() + chrono::Duration::days(SESSION_TTL_DAYS),
        };
        self.store.insert_session(&session).await?;
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());

        info!("[auth] user logged in: {}", user.email);
        Ok(Some(self.cookie_value(&session.token)))
    }

    /// Destroy a session (cache and store); safe to call for a token that
    /// no longer exists.
    pub async fn logout(&self, token: &str) -> anyhow::Result<()> {
        self.sessions.write().await.remove(token);
        self.store.delete_session(token).await?;

        info!("[auth] session invalidated");
        Ok(())
    }

    /// Resolve a raw cookie value to a request context.
    ///
    /// A missing signature, a bad signature, an unknown token, or an
    /// expired session all resolve to `Ok(None)` (anonymous); only store
    /// failures surface as errors.
    pub async fn resolve_cookie(&self, cookie: &str) -> anyhow::Result<Option<Ctx>> {
        let Some((token, sig)) = cookie.split_once('.') else {
            return Ok(None);
        };
        if sig != self.sign(token) {
            warn!("[auth] session cookie with bad signature");
            return Ok(None);
        }

        // Check cache first
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(token) {
                if session.expires_at > Utc::now() {
                    return Ok(Some(Ctx::new(session.user_id, token.to_string())));
                }
            }
        }

        let Some(session) = self.store.session_by_token(token).await? else {
            return Ok(None);
        };
        if session.expires_at <= Utc::now() {
            return Ok(None);
        }

        self.sessions
            .write()
            .await
            .insert(token.to_string(), session.clone());

        Ok(Some(Ctx::new(session.user_id, token.to_string())))
    }

    /// Cookie value for a session token: `<token>.<hex sha256(token || key)>`
    pub fn cookie_value(&self, token: &str) -> String {
        format!("{token}.{}", self.sign(token))
    }

    fn sign(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hasher.update(self.secret_key.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
