//! 認証フローE2Eテスト
//!
//! 登録 → ログイン → 保護ルート → 不正トークン

use axum::http::StatusCode;
use serde_json::json;

use crate::support::{build_app, send};

#[tokio::test]
async fn test_complete_auth_flow() {
    let (app, _db_pool) = build_app().await;

    // Step 1: 登録
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
    let account = &body["response"];
    assert_eq!(account["username"], "alice");
    assert_eq!(account["mail"], "a@x.com");
    assert!(account.get("password").is_none());
    assert!(account.get("passwordHash").is_none());
    let token = account["accessToken"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 64);

    // Step 2: ログイン（同じトークンが返る）
    let (status, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "mail": "a@x.com", "password": "pw12345" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["accessToken"], token.as_str());
    assert_eq!(body["response"]["id"], account["id"]);

    // Step 3: トークンで保護ルートにアクセス
    let (status, body) = send(&app, "GET", "/todos", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], json!([]));

    let (status, body) = send(
        &app,
        "POST",
        "/todos",
        Some(&token),
        Some(json!({ "description": "Watch Making a Murderer", "category": "series" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let todo_id = body["response"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["response"]["user"], account["id"]);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/todos/{}/completed", todo_id),
        Some(&token),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["completedCount"], 1);
    assert!(body["response"].get("accessToken").is_none());

    // Step 4: 不正なトークンは401
    let (status, body) = send(&app, "GET", "/todos", Some("wrong-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["response"], "Please login");
}

#[tokio::test]
async fn test_tokens_are_distinct_per_account() {
    let (app, _db_pool) = build_app().await;

    let alice = crate::support::register(&app, "alice", "a@x.com", "pw12345").await;
    let bob = crate::support::register(&app, "bob", "b@x.com", "pw12345").await;

    assert_ne!(alice["accessToken"], bob["accessToken"]);

    // それぞれのトークンは自分のアカウントに解決される
    let (_, me) = send(&app, "GET", "/me", alice["accessToken"].as_str(), None).await;
    assert_eq!(me["response"]["username"], "alice");
    let (_, me) = send(&app, "GET", "/me", bob["accessToken"].as_str(), None).await;
    assert_eq!(me["response"]["username"], "bob");
}
