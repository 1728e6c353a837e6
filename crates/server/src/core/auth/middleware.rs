use crate::core::config::AppState;
use crate::core::error::Result;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Resolve the session cookie (if any) into a [`Ctx`](crate::core::ctx::Ctx)
/// stored in request extensions. Runs for every route; requests without a
/// valid session simply proceed anonymously.
pub async fn mw_ctx_resolver(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    debug!("MIDDLEWARE: ctx_resolver");

    if let Some(raw) = session_cookie(&req) {
        if let Some(ctx) = state.auth.resolve_cookie(&raw).await? {
            req.extensions_mut().insert(ctx);
        }
    }

    Ok(next.run(req).await)
}

fn session_cookie(req: &Request) -> Option<String> {
    let header = req.headers().get(header::COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
