//! セッションゲートの結合テスト

use axum::http::StatusCode;

use crate::support::{build_app, register_token, send};

#[tokio::test]
async fn test_missing_and_unknown_tokens_look_the_same() {
    let (app, _db_pool) = build_app().await;
    register_token(&app, "alice", "a@x.com").await;

    let (missing_status, missing_body) = send(&app, "GET", "/todos", None, None).await;
    let (empty_status, empty_body) = send(&app, "GET", "/todos", Some(""), None).await;
    let (unknown_status, unknown_body) =
        send(&app, "GET", "/todos", Some("wrong-token"), None).await;

    assert_eq!(missing_status, StatusCode::UNAUTHORIZED);
    assert_eq!(empty_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing_body["response"], "Please login");
    assert_eq!(missing_body, empty_body);
    assert_eq!(missing_body, unknown_body);
}

#[tokio::test]
async fn test_token_is_raw_header_value() {
    let (app, _db_pool) = build_app().await;
    let token = register_token(&app, "alice", "a@x.com").await;

    let (status, _) = send(&app, "GET", "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // スキーム付きは一致しない
    let (status, _) = send(&app, "GET", "/me", Some(&format!("Bearer {}", token)), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let (app, db_pool) = build_app().await;
    db_pool.close().await;

    let (status, body) = send(&app, "GET", "/todos", Some("any-token"), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_ne!(body["response"], "Please login");
}

#[tokio::test]
async fn test_public_routes_skip_gate() {
    let (app, _db_pool) = build_app().await;

    for uri in ["/", "/movies", "/books"] {
        let (status, _) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
    }
}
