#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use microblog_server::core::auth::{password, AuthManager};
use microblog_server::core::store::BlogStore;
use microblog_server::core::{router, AppState, BlogConfig};

pub const TEST_SECRET_KEY: &str = "test-secret-key";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _dir: Option<tempfile::TempDir>,
}

/// Build a fresh app over an empty database, seeded with the admin and
/// regular test users. Honors `TEST_DATABASE_URL` / `TEST_SECRET_KEY`;
/// falls back to a tempdir database and a fixed key.
pub async fn test_app() -> TestApp {
    let (database_path, dir) = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => (
            PathBuf::from(url.strip_prefix("sqlite:").unwrap_or(url.as_str())),
            None,
        ),
        Err(_) => {
            let dir = tempfile::tempdir().unwrap();
            (dir.path().join("test.sqlite"), Some(dir))
        }
    };
    // Every test starts from an empty database
    let _ = std::fs::remove_file(&database_path);

    let secret_key =
        std::env::var("TEST_SECRET_KEY").unwrap_or_else(|_| TEST_SECRET_KEY.to_string());

    let store = Arc::new(BlogStore::open(&database_path).await.unwrap());
    let auth = Arc::new(AuthManager::new(store.clone(), secret_key.clone()));

    store
        .create_user(
            "admin",
            "admin",
            "admin@admin.com",
            &password::hash_password("admin2016").unwrap(),
        )
        .await
        .unwrap();
    store
        .create_user(
            "test",
            "user",
            "test@user.com",
            &password::hash_password("test2016").unwrap(),
        )
        .await
        .unwrap();

    let config = BlogConfig {
        database_path,
        secret_key,
        bind_addr: ([127, 0, 0, 1], 0).into(),
    };
    let state = AppState {
        config,
        store,
        auth,
    };

    TestApp {
        app: router(state.clone()),
        state,
        _dir: dir,
    }
}

pub async fn get(app: &Router, path: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_with_cookie(app: &Router, path: &str, cookie: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(path)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_form(
    app: &Router,
    path: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Response<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// The `session=...` pair from a Set-Cookie header, ready to send back
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    let set_cookie = resp.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    set_cookie.split(';').next().map(|s| s.to_string())
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .expect("response should be a redirect")
        .to_str()
        .unwrap()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Log in through the real handler and return the session cookie
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let resp = post_form(
        app,
        "/login",
        &[("email", email), ("password", password)],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "login should redirect");
    session_cookie(&resp).expect("login should set the session cookie")
}
