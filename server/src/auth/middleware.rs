// アクセストークン認証ミドルウェア（セッションゲート）

use crate::api::failure;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::SqlitePool;
use truecrime_common::auth::Account;
use truecrime_common::error::{ServerError, ServerResult};

/// 認証失敗時のメッセージ（トークン欠落・不明トークンで共通）
pub const PLEASE_LOGIN: &str = "Please login";

/// ゲートの拒否
///
/// `ServerError::Authentication`（欠落・不明トークン）は区別せず401、
/// それ以外はストア障害として500になる。
#[derive(Debug)]
pub struct GateRejection(pub ServerError);

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        if self.0.is_authentication() {
            return failure(StatusCode::UNAUTHORIZED, PLEASE_LOGIN, None);
        }
        failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            self.0.to_string(),
            Some("Internal server error"),
        )
    }
}

/// Authorizationヘッダーから生のトークン値を取り出す
///
/// `Bearer` などのスキームは付かない前提。空値は欠落として扱う。
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|token| !token.trim().is_empty())
}

/// トークンからアカウントを解決する
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `token` - リクエストのトークン（なければNone）
///
/// # Returns
/// * `Ok(Account)` - トークンが完全一致したアカウント
/// * `Err(ServerError::Authentication)` - トークン欠落または不明
/// * `Err(ServerError::Database)` - ストア障害
pub async fn authenticate(pool: &SqlitePool, token: Option<&str>) -> ServerResult<Account> {
    let token = token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ServerError::Authentication("Missing access token".to_string()))?;

    crate::db::users::find_by_token(pool, token)
        .await?
        .ok_or_else(|| ServerError::Authentication("Unknown access token".to_string()))
}

/// アクセストークン認証ミドルウェア
///
/// Authorizationヘッダーの値でアカウントを検索し、見つかればrequestの拡張データに格納する
///
/// # Arguments
/// * `State(pool)` - データベース接続プール
/// * `request` - HTTPリクエスト
/// * `next` - 次のミドルウェア/ハンドラー
///
/// # Returns
/// * `Ok(Response)` - 認証成功
/// * `Err(Response)` - 401 Please login / 500 ストア障害
pub async fn access_token_auth_middleware(
    State(pool): State<SqlitePool>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token(request.headers());

    let account = authenticate(&pool, token).await.map_err(|e| {
        if e.is_authentication() {
            tracing::debug!("Access token rejected: {}", e);
        } else {
            tracing::error!("Access token lookup failed: {}", e);
        }
        GateRejection(e).into_response()
    })?;

    request.extensions_mut().insert(account);

    Ok(next.run(request).await)
}
