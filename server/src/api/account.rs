//! プロフィールAPI
//!
//! ゲートが解決したアカウント自身の情報を参照・更新する

use crate::api::{failure, success};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    Extension, Json,
};
use truecrime_common::auth::{Account, AccountPatch, ProfileResponse};
use truecrime_common::protocol::ProfileUpdateRequest;

/// GET /me - 自分のプロフィール
pub async fn get_profile(Extension(account): Extension<Account>) -> Response {
    success(
        StatusCode::OK,
        ProfileResponse::from(&account),
        "Found profile",
    )
}

/// PATCH /me - アバター更新
///
/// # Returns
/// * `200 OK` - 更新後のプロフィール
/// * `400 Bad Request` - 入力不備、ストア失敗
pub async fn update_profile(
    Extension(account): Extension<Account>,
    State(app_state): State<AppState>,
    payload: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(request) = payload.map_err(|rejection| {
        failure(
            StatusCode::BAD_REQUEST,
            rejection.body_text(),
            Some("Could not update profile"),
        )
    })?;

    let updated = crate::db::users::update_by_id(
        &app_state.db_pool,
        account.id,
        AccountPatch {
            avatar: Some(request.avatar),
            ..Default::default()
        },
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to update profile of {}: {}", account.id, e);
        failure(
            StatusCode::BAD_REQUEST,
            e.to_string(),
            Some("Could not update profile"),
        )
    })?;

    Ok(success(
        StatusCode::OK,
        ProfileResponse::from(&updated),
        "Profile updated",
    ))
}
