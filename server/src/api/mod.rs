//! REST APIハンドラー
//!
//! 登録・ログイン、カタログ参照、To-do、プロフィール

pub mod account;
pub mod auth;
pub mod catalog;
pub mod index;
pub mod todos;

use crate::AppState;
use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use truecrime_common::protocol::ApiEnvelope;
use uuid::Uuid;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    // アクセストークン認証が必要な保護されたルート
    let protected_routes = Router::new()
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/:id",
            patch(todos::update_todo).delete(todos::delete_todo),
        )
        .route("/todos/:id/completed", patch(todos::set_completed))
        .route(
            "/me",
            get(account::get_profile).patch(account::update_profile),
        )
        .layer(middleware::from_fn_with_state(
            state.db_pool.clone(),
            crate::auth::middleware::access_token_auth_middleware,
        ));

    Router::new()
        .route("/", get(index::api_info))
        // 認証エンドポイント（認証不要）
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(protected_routes)
        // カタログ（認証不要）
        .route("/:collection", get(catalog::list_entries))
        .route("/:collection/:id", get(catalog::get_entry))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 成功レスポンスを組み立てる
pub fn success<T: Serialize>(status: StatusCode, response: T, message: &str) -> Response {
    (status, Json(ApiEnvelope::ok(response).with_message(message))).into_response()
}

/// 失敗レスポンスを組み立てる
pub fn failure<T: Serialize>(status: StatusCode, response: T, message: Option<&str>) -> Response {
    let envelope = ApiEnvelope::failure(response);
    let envelope = match message {
        Some(message) => envelope.with_message(message),
        None => envelope,
    };
    (status, Json(envelope)).into_response()
}

/// パスパラメータのIDを解釈する（不正な形式は400）
#[allow(clippy::result_large_err)]
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(raw)
        .map_err(|e| failure(StatusCode::BAD_REQUEST, e.to_string(), Some(message)))
}
