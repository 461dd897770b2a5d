//! テスト共通ヘルパー
//!
//! インメモリDBでルーターを組み立て、`oneshot` でリクエストを送る。

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;
use truecrime_server::{api, db::migrations::initialize_database, AppState};

/// テスト用のルーターとDBプールを作成
pub async fn build_app() -> (Router, SqlitePool) {
    let db_pool = initialize_database("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    let app = api::create_router(AppState {
        db_pool: db_pool.clone(),
    });
    (app, db_pool)
}

/// リクエストを送り、ステータスとJSONボディを返す
///
/// `token` はAuthorizationヘッダーにそのまま入る（スキームなし）。
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// アカウントを登録し、レスポンスの `response` 部分を返す
pub async fn register(app: &Router, username: &str, mail: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": username, "mail": mail, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["response"].clone()
}

/// 登録済みアカウントのアクセストークンを返す
pub async fn register_token(app: &Router, username: &str, mail: &str) -> String {
    let account = register(app, username, mail, "pw12345").await;
    account["accessToken"].as_str().unwrap().to_string()
}
