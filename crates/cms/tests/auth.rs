//! Integration tests for sign-in, sign-out and the guard on mutating routes

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{TestApp, ADMIN};
use tower_sessions::ExpiredDeletion;

#[tokio::test]
async fn test_signin_page_renders() {
    let mut app = TestApp::new();

    let response = app.get("/users/signin").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Username"));
    assert!(response.body.contains("Password"));
    assert!(response.body.contains("<input"));
}

#[tokio::test]
async fn test_signin_valid() {
    let mut app = TestApp::new();

    let response = app
        .post_form("/users/signin", &[("username", ADMIN), ("password", "secret")])
        .await;
    response.assert_redirect_home();

    let index = app.follow(&response).await;
    assert!(index.body.contains("Welcome!"));
    assert!(index.body.contains("Signed in as admin"));
}

#[tokio::test]
async fn test_signin_invalid_credentials() {
    let mut app = TestApp::new();

    let response = app
        .post_form("/users/signin", &[("username", ADMIN), ("password", "wrong")])
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Invalid Credentials"));
    assert!(!response.body.contains("Signed in as"));
}

#[tokio::test]
async fn test_signin_unknown_user_looks_the_same() {
    let mut app = TestApp::new();

    let response = app
        .post_form("/users/signin", &[("username", "guest"), ("password", "secret")])
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Invalid Credentials"));

    let response = app.get("/new").await;
    response.assert_redirect_home();
}

#[tokio::test]
async fn test_signout() {
    let mut app = TestApp::new();
    app.sign_in().await;
    let index = app.get("/").await;
    assert!(index.body.contains("Welcome!"));

    let response = app.post_form("/users/signout", &[]).await;
    response.assert_redirect_home();

    let index = app.follow(&response).await;
    assert!(index.body.contains("You have been signed out."));
    assert!(index.body.contains("Sign In"));
    assert!(!index.body.contains("Signed in as"));

    let response = app.get("/new").await;
    response.assert_redirect_home();
}

#[tokio::test]
async fn test_signout_is_idempotent() {
    let mut app = TestApp::new();

    for _ in 0..2 {
        let response = app.post_form("/users/signout", &[]).await;
        response.assert_redirect_home();

        let index = app.follow(&response).await;
        assert!(index.body.contains("You have been signed out."));
        assert!(index.body.contains("Sign In"));
    }
}

#[tokio::test]
async fn test_redirected_when_not_signed_in() {
    let mut app = TestApp::new();
    app.create_document("about.txt", "original");

    let mut attempts = Vec::new();
    attempts.push(app.get("/new").await);
    attempts.push(app.post_form("/new", &[("name", "sneaky.txt")]).await);
    attempts.push(app.get("/about.txt/edit").await);
    attempts.push(
        app.post_form("/about.txt/edit", &[("file_content", "defaced")])
            .await,
    );
    attempts.push(app.get("/about.txt/delete").await);
    attempts.push(app.post_form("/about.txt/delete", &[]).await);

    for response in &attempts {
        response.assert_redirect_home();
    }

    let index = app.get("/").await;
    assert!(index.body.contains("You must be signed in to do that."));

    assert_eq!(app.document_names(), vec!["about.txt".to_string()]);
    assert_eq!(app.read_document("about.txt"), "original");
}

#[tokio::test]
async fn test_viewing_is_not_guarded() {
    let mut app = TestApp::new();
    app.create_document("public.txt", "anyone can read");

    let response = app.get("/public.txt").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "anyone can read");
}

#[tokio::test]
async fn test_credential_edits_apply_to_next_signin() {
    let mut app = TestApp::new();

    let hash = bcrypt::hash("hunter2", 4).unwrap();
    std::fs::write(app.credentials.path(), format!("editor: \"{}\"\n", hash)).unwrap();

    let response = app
        .post_form("/users/signin", &[("username", ADMIN), ("password", "secret")])
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .post_form("/users/signin", &[("username", "editor"), ("password", "hunter2")])
        .await;
    response.assert_redirect_home();
}

#[tokio::test]
async fn test_removed_credential_keeps_existing_session() {
    let mut app = TestApp::new();
    app.sign_in().await;

    std::fs::write(app.credentials.path(), "{}\n").unwrap();

    let response = app.get("/new").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Signed in as admin."));

    app.post_form("/users/signout", &[]).await;
    let response = app
        .post_form("/users/signin", &[("username", ADMIN), ("password", "secret")])
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_expired_sessions_are_removed() {
    let mut app = TestApp::with_session_inactivity(Duration::from_secs(1));

    for i in 0..20 {
        app.clear_cookies();
        let response = app.get(&format!("/ghost{}.txt", i)).await;
        response.assert_redirect_home();
    }
    assert_eq!(app.sessions.len().await, 20);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    app.sessions.delete_expired().await.unwrap();

    assert!(app.sessions.is_empty().await);
}

#[tokio::test]
async fn test_status_routes() {
    let mut app = TestApp::new();

    let response = app.get("/_status/livez").await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/_status/readyz").await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/_status/version").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("build_profile"));
}

#[tokio::test]
async fn test_static_stylesheet() {
    let mut app = TestApp::new();

    let response = app.get("/static/style.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type().unwrap().starts_with("text/css"));
}
