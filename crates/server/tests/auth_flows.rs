mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::*;
use microblog_server::core::models::Session;

#[tokio::test]
async fn register_then_login_succeeds() {
    let t = test_app().await;

    let resp = post_form(
        &t.app,
        "/register",
        &[
            ("first_name", "John"),
            ("last_name", "Doe"),
            ("email", "John@Doe.com"),
            ("password", "testuser1"),
            ("confirm_password", "testuser1"),
        ],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let user = t
        .state
        .store
        .user_by_email("John@Doe.com")
        .await
        .unwrap()
        .expect("user row should exist after registration");
    assert_eq!(user.display_name(), "John Doe");
    assert_ne!(user.password_hash, "testuser1");

    let cookie = login(&t.app, "John@Doe.com", "testuser1").await;
    let home = get_with_cookie(&t.app, "/", &cookie).await;
    assert_eq!(home.status(), StatusCode::OK);
    assert!(body_string(home).await.contains("John Doe"));
}

#[tokio::test]
async fn register_duplicate_email_is_rejected() {
    let t = test_app().await;

    let resp = post_form(
        &t.app,
        "/register",
        &[
            ("first_name", "Someone"),
            ("last_name", "Else"),
            ("email", "admin@admin.com"),
            ("password", "pw123456"),
            ("confirm_password", "pw123456"),
        ],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("already registered"));

    // The seeded row is untouched
    let user = t
        .state
        .store
        .user_by_email("admin@admin.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.first_name, "admin");
}

#[tokio::test]
async fn register_password_mismatch_creates_no_user() {
    let t = test_app().await;

    let resp = post_form(
        &t.app,
        "/register",
        &[
            ("first_name", "John"),
            ("last_name", "Doe"),
            ("email", "mismatch@example.com"),
            ("password", "one-password"),
            ("confirm_password", "another-password"),
        ],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("Passwords do not match"));

    assert!(t
        .state
        .store
        .user_by_email("mismatch@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn register_empty_field_creates_no_user() {
    let t = test_app().await;

    let resp = post_form(
        &t.app,
        "/register",
        &[
            ("first_name", "   "),
            ("last_name", "Doe"),
            ("email", "blank@example.com"),
            ("password", "pw123456"),
            ("confirm_password", "pw123456"),
        ],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("All fields are required"));

    assert!(t
        .state
        .store
        .user_by_email("blank@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn failed_login_is_generic_and_sets_no_session() {
    let t = test_app().await;

    // Wrong password for a known email
    let resp = post_form(
        &t.app,
        "/login",
        &[("email", "admin@admin.com"), ("password", "wrong")],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(session_cookie(&resp).is_none());
    let wrong_password = body_string(resp).await;
    assert!(wrong_password.contains("Invalid email or password"));

    // Unknown email gets the exact same message
    let resp = post_form(
        &t.app,
        "/login",
        &[("email", "nobody@example.com"), ("password", "wrong")],
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(session_cookie(&resp).is_none());
    assert!(body_string(resp)
        .await
        .contains("Invalid email or password"));
}

#[tokio::test]
async fn admin_login_binds_session_to_admin() {
    let t = test_app().await;

    let cookie = login(&t.app, "admin@admin.com", "admin2016").await;

    // Cookie is "session=<token>.<sig>"; look the token up in the store
    let value = cookie.strip_prefix("session=").unwrap();
    let (token, _sig) = value.split_once('.').unwrap();
    let session = t
        .state
        .store
        .session_by_token(token)
        .await
        .unwrap()
        .expect("session row should exist after login");
    let user = t
        .state
        .store
        .user_by_id(session.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.email, "admin@admin.com");
}

#[tokio::test]
async fn logout_destroys_session_and_repeating_is_safe() {
    let t = test_app().await;

    let cookie = login(&t.app, "admin@admin.com", "admin2016").await;

    let resp = get_with_cookie(&t.app, "/logout", &cookie).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let cleared = resp
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cleared.contains("Max-Age=0"));

    // The session row is gone
    let value = cookie.strip_prefix("session=").unwrap();
    let (token, _sig) = value.split_once('.').unwrap();
    assert!(t
        .state
        .store
        .session_by_token(token)
        .await
        .unwrap()
        .is_none());

    // A second logout with the stale cookie is just an anonymous request
    let resp = get_with_cookie(&t.app, "/logout", &cookie).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn tampered_cookie_is_anonymous() {
    let t = test_app().await;

    let cookie = login(&t.app, "admin@admin.com", "admin2016").await;
    let tampered = format!("{}ff", cookie);

    let resp = get_with_cookie(&t.app, "/logout", &tampered).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn expired_session_is_anonymous() {
    let t = test_app().await;

    let admin = t
        .state
        .store
        .user_by_email("admin@admin.com")
        .await
        .unwrap()
        .unwrap();
    let session = Session {
        token: "expired-token".into(),
        user_id: admin.id,
        created_at: Utc::now() - chrono::Duration::days(60),
        expires_at: Utc::now() - chrono::Duration::days(30),
    };
    t.state.store.insert_session(&session).await.unwrap();

    // Correctly signed cookie over an expired session
    let cookie = format!("session={}", t.state.auth.cookie_value("expired-token"));
    let resp = get_with_cookie(&t.app, "/logout", &cookie).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}
