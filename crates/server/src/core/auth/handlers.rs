//! Auth handlers: registration, login, logout

use axum::{
    extract::{Form, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{info, warn};

use crate::core::auth::middleware::SESSION_COOKIE;
use crate::core::auth::RegisterError;
use crate::core::config::AppState;
use crate::core::ctx::Ctx;
use crate::core::error::Result;
use crate::core::models::{LoginForm, RegisterForm};
use crate::core::pages;

/// GET /register
pub async fn register_form() -> Html<String> {
    Html(pages::register_page(None, &RegisterForm::default()))
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    info!("POST /register - {}", form.email);

    let form = form.trimmed();
    if let Some(msg) = form.validate() {
        return Ok(Html(pages::register_page(Some(msg), &form)).into_response());
    }

    match state.auth.register(&form).await {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(RegisterError::EmailTaken) => {
            warn!("registration rejected, email taken: {}", form.email);
            Ok(Html(pages::register_page(
                Some("That email is already registered"),
                &form,
            ))
            .into_response())
        }
        Err(RegisterError::Other(e)) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form() -> Html<String> {
    Html(pages::login_page(None, ""))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    info!("POST /login - {}", form.email);

    let email = form.email.trim();
    match state.auth.login(email, &form.password).await? {
        Some(cookie) => {
            let header_value = format!("{SESSION_COOKIE}={cookie}; Path=/; HttpOnly; SameSite=Lax");
            Ok(([(header::SET_COOKIE, header_value)], Redirect::to("/")).into_response())
        }
        // Same message for unknown email and wrong password
        None => Ok(Html(pages::login_page(
            Some("Invalid email or password"),
            email,
        ))
        .into_response()),
    }
}

/// GET /logout — requires a session; anonymous requests are redirected to
/// the login page by the `Ctx` extractor.
pub async fn logout(State(state): State<AppState>, ctx: Ctx) -> Result<Response> {
    state.auth.logout(ctx.session_token()).await?;
    info!("session ended for user {}", ctx.user_id());

    let clear = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    Ok(([(header::SET_COOKIE, clear)], Redirect::to("/")).into_response())
}
