//! POST /login の契約テスト

use axum::http::StatusCode;
use serde_json::json;

use crate::support::{build_app, register, send};

#[tokio::test]
async fn test_login_returns_existing_token() {
    let (app, _db_pool) = build_app().await;
    let account = register(&app, "alice", "a@x.com", "pw12345").await;

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({ "mail": "a@x.com", "password": "pw12345" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["response"], account);
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _db_pool) = build_app().await;
    register(&app, "alice", "a@x.com", "pw12345").await;

    let (wrong_pw_status, wrong_pw_body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "mail": "a@x.com", "password": "pw123456" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "mail": "nobody@x.com", "password": "pw12345" })),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_pw_body["response"], "Credentials do not match");
    assert_eq!(unknown_status, wrong_pw_status);
    assert_eq!(unknown_body, wrong_pw_body);
}

#[tokio::test]
async fn test_login_malformed_body() {
    let (app, _db_pool) = build_app().await;

    let (status, body) = send(&app, "POST", "/login", None, Some(json!({ "mail": 42 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_rejects_longer_password_sharing_72_byte_prefix() {
    let (app, _db_pool) = build_app().await;
    let prefix = "a".repeat(72);
    register(&app, "alice", "a@x.com", &prefix).await;

    for suffix in ["X", "anything else"] {
        let (status, body) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({ "mail": "a@x.com", "password": format!("{}{}", prefix, suffix) })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["response"], "Credentials do not match");
    }
}
