//! To-do API
//!
//! すべてゲート通過後のアカウントにスコープされる。

use crate::api::{failure, parse_id, success};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Extension, Json,
};
use truecrime_common::auth::Account;
use truecrime_common::protocol::CompletedRequest;
use truecrime_common::types::TodoFields;

/// 該当なし（存在しない、または他のアカウントの所有）
pub const TODO_NOT_FOUND: &str = "Todo not found";

#[allow(clippy::result_large_err)]
fn read_fields(payload: Result<Json<TodoFields>, JsonRejection>) -> Result<TodoFields, Response> {
    let Json(fields) = payload.map_err(|rejection| {
        failure(
            StatusCode::BAD_REQUEST,
            rejection.body_text(),
            Some("Invalid todo"),
        )
    })?;

    if fields.description.trim().is_empty() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "description is required",
            Some("Invalid todo"),
        ));
    }
    Ok(fields)
}

fn not_found() -> Response {
    failure(StatusCode::NOT_FOUND, TODO_NOT_FOUND, None)
}

fn store_failure(action: &str, e: impl std::fmt::Display) -> Response {
    tracing::error!("Failed to {} todo: {}", action, e);
    failure(
        StatusCode::BAD_REQUEST,
        e.to_string(),
        Some(&format!("Could not {} todo", action)),
    )
}

/// GET /todos - 自分のTo-do一覧
pub async fn list_todos(
    Extension(account): Extension<Account>,
    State(app_state): State<AppState>,
) -> Result<Response, Response> {
    let todos = crate::db::todos::list_for_user(&app_state.db_pool, account.id)
        .await
        .map_err(|e| store_failure("list", e))?;

    Ok(success(StatusCode::OK, todos, "Successfully found todo list"))
}

/// POST /todos - To-do作成
///
/// # Returns
/// * `201 Created` - 作成されたTo-do
/// * `400 Bad Request` - 入力不備、ストア失敗
pub async fn create_todo(
    Extension(account): Extension<Account>,
    State(app_state): State<AppState>,
    payload: Result<Json<TodoFields>, JsonRejection>,
) -> Result<Response, Response> {
    let fields = read_fields(payload)?;

    let todo = crate::db::todos::create(&app_state.db_pool, account.id, fields)
        .await
        .map_err(|e| store_failure("create", e))?;

    tracing::debug!("Todo created: id={} user={}", todo.id, account.id);

    Ok(success(StatusCode::CREATED, todo, "Todo created"))
}

/// PATCH /todos/:id - To-do更新
pub async fn update_todo(
    Extension(account): Extension<Account>,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TodoFields>, JsonRejection>,
) -> Result<Response, Response> {
    let id = parse_id(&id, "Could not update todo")?;
    let fields = read_fields(payload)?;

    let todo = crate::db::todos::update_for_user(&app_state.db_pool, account.id, id, fields)
        .await
        .map_err(|e| store_failure("update", e))?
        .ok_or_else(not_found)?;

    Ok(success(StatusCode::OK, todo, "Todo updated"))
}

/// PATCH /todos/:id/completed - 完了状態の切り替え
///
/// フラグが実際に変化した場合のみ、所有者の完了数を±1する（同一トランザクション）。
///
/// # Returns
/// * `200 OK` - 更新後のTo-do
/// * `400 Bad Request` - 入力不備、ストア失敗
/// * `404 Not Found` - 該当なし
pub async fn set_completed(
    Extension(account): Extension<Account>,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CompletedRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let id = parse_id(&id, "Could not update todo")?;
    let Json(request) = payload.map_err(|rejection| {
        failure(
            StatusCode::BAD_REQUEST,
            rejection.body_text(),
            Some("Could not update todo"),
        )
    })?;

    let (todo, changed) = crate::db::todos::set_completed_for_user(
        &app_state.db_pool,
        account.id,
        id,
        request.completed,
    )
    .await
    .map_err(|e| store_failure("update", e))?
    .ok_or_else(not_found)?;

    if changed {
        tracing::debug!(
            "Todo {} completed={} for username={}",
            todo.id,
            todo.completed,
            account.username
        );
    }

    Ok(success(StatusCode::OK, todo, "Todo updated"))
}

/// DELETE /todos/:id - To-do削除
///
/// # Returns
/// * `200 OK` - 削除されたTo-do
/// * `404 Not Found` - 該当なし
pub async fn delete_todo(
    Extension(account): Extension<Account>,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let id = parse_id(&id, "Could not delete todo")?;

    let todo = crate::db::todos::delete_for_user(&app_state.db_pool, account.id, id)
        .await
        .map_err(|e| store_failure("delete", e))?
        .ok_or_else(not_found)?;

    Ok(success(StatusCode::OK, todo, "Todo deleted"))
}
