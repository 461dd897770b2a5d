//! GET /me, PATCH /me の契約テスト

use axum::http::StatusCode;
use serde_json::json;

use crate::support::{build_app, register_token, send};

#[tokio::test]
async fn test_profile_hides_credentials() {
    let (app, _db_pool) = build_app().await;
    let token = register_token(&app, "alice", "a@x.com").await;

    let (status, body) = send(&app, "GET", "/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let profile = body["response"].as_object().unwrap();
    assert_eq!(profile["username"], "alice");
    assert_eq!(profile["completedCount"], 0);
    assert!(profile.contains_key("createdAt"));
    assert!(!profile.contains_key("accessToken"));
    assert!(!profile.contains_key("passwordHash"));
}

#[tokio::test]
async fn test_update_avatar() {
    let (app, _db_pool) = build_app().await;
    let token = register_token(&app, "alice", "a@x.com").await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/me",
        Some(&token),
        Some(json!({ "avatar": "https://img.example/alice.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["avatar"], "https://img.example/alice.png");

    // ログインのレスポンスにも反映され、トークンは変わらない
    let (_, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "mail": "a@x.com", "password": "pw12345" })),
    )
    .await;
    assert_eq!(body["response"]["avatar"], "https://img.example/alice.png");
    assert_eq!(body["response"]["accessToken"], token.as_str());

    let (_, body) = send(&app, "PATCH", "/me", Some(&token), Some(json!({ "avatar": null }))).await;
    assert!(body["response"]["avatar"].is_null());
}

#[tokio::test]
async fn test_profile_requires_token() {
    let (app, _db_pool) = build_app().await;

    let (status, body) = send(&app, "PATCH", "/me", None, Some(json!({ "avatar": "x" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["response"], "Please login");
}
