//! POST /register の契約テスト

use axum::http::StatusCode;
use serde_json::json;

use crate::support::{build_app, register, send};

#[tokio::test]
async fn test_register_contract() {
    let (app, _db_pool) = build_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "alice", "mail": "a@x.com", "password": "pw12345" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let account = body["response"].as_object().unwrap();
    for field in ["username", "id", "mail", "accessToken", "avatar"] {
        assert!(account.contains_key(field), "missing field {}", field);
    }
    assert_eq!(account.len(), 5, "unexpected fields: {:?}", account.keys());
    assert!(account["avatar"].is_null());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let (app, _db_pool) = build_app().await;
    let first = register(&app, "alice", "a@x.com", "pw12345").await;

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "alice", "mail": "other@x.com", "password": "other-pw" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["response"], "Username or mail already exists");

    // 最初のアカウントは変更されない
    let (status, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "mail": "a@x.com", "password": "pw12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["accessToken"], first["accessToken"]);
}

#[tokio::test]
async fn test_register_duplicate_mail() {
    let (app, _db_pool) = build_app().await;
    register(&app, "alice", "a@x.com", "pw12345").await;

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "alice2", "mail": "a@x.com", "password": "pw12345" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["response"], "Username or mail already exists");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let (app, _db_pool) = build_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "alice", "password": "pw12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": "", "mail": "a@x.com", "password": "pw12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_accepts_unusual_password() {
    let (app, _db_pool) = build_app().await;
    register(&app, "carol", "c@x.com", "ünïcødé 🔍 with spaces").await;

    let (status, _) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "mail": "c@x.com", "password": "ünïcødé 🔍 with spaces" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_password_over_72_bytes() {
    let (app, _db_pool) = build_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({
            "username": "dave",
            "mail": "d@x.com",
            "password": format!("{}X", "a".repeat(72))
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // 72バイトちょうどは受け付ける
    register(&app, "dave", "d@x.com", &"a".repeat(72)).await;
}
