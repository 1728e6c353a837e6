//! Route table
//!
//! Explicit verb+path mapping; the session-resolving middleware runs for
//! every route and authorization is enforced per-handler by the `Ctx`
//! extractor.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::core::auth::{handlers as auth_handlers, middleware::mw_ctx_resolver};
use crate::core::AppState;
use crate::posts;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(posts::home))
        .route("/post", post(posts::create_post))
        .route(
            "/register",
            get(auth_handlers::register_form).post(auth_handlers::register),
        )
        .route(
            "/login",
            get(auth_handlers::login_form).post(auth_handlers::login),
        )
        .route("/logout", get(auth_handlers::logout))
        .route("/health", get(health_check))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            mw_ctx_resolver,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
