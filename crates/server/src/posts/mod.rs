//! Post handlers: public home listing and authenticated post creation

use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::core::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::Result;
use crate::core::models::PostForm;
use crate::core::pages;

/// GET / — public; shows all posts, most recent first. Logged-in viewers
/// also get the inline new-post form.
pub async fn home(State(state): State<AppState>, ctx: Option<Ctx>) -> Result<Html<String>> {
    let posts = state.store.list_posts().await?;
    let viewer = viewer_name(&state, ctx.as_ref()).await?;

    Ok(Html(pages::home_page(&posts, viewer.as_deref(), None)))
}

/// POST /post — requires a session
pub async fn create_post(
    State(state): State<AppState>,
    ctx: Ctx,
    Form(form): Form<PostForm>,
) -> Result<Response> {
    let title = form.title.trim();
    let content = form.content.trim();

    if title.is_empty() || content.is_empty() {
        let posts = state.store.list_posts().await?;
        let viewer = viewer_name(&state, Some(&ctx)).await?;
        return Ok(Html(pages::home_page(
            &posts,
            viewer.as_deref(),
            Some("Title and content are required"),
        ))
        .into_response());
    }

    let post_id = state.store.insert_post(ctx.user_id(), title, content).await?;
    info!("post {post_id} created by user {}", ctx.user_id());

    Ok(Redirect::to("/").into_response())
}

async fn viewer_name(state: &AppState, ctx: Option<&Ctx>) -> Result<Option<String>> {
    let Some(ctx) = ctx else {
        return Ok(None);
    };
    let user = state.store.user_by_id(ctx.user_id()).await?;
    Ok(user.map(|u| u.display_name()))
}
