//! 登録・ログインAPI
//!
//! 認証不要のエンドポイント。どちらも成功時にアクセストークンを返す。

use crate::api::{failure, success};
use crate::auth::password::{
    equalize_missing_account_timing, hash_password, verify_password, MAX_PASSWORD_BYTES,
};
use crate::auth::token::issue_token;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    Json,
};
use sqlx::SqlitePool;
use truecrime_common::auth::{Account, AccountResponse, NewAccount};
use truecrime_common::error::{ServerError, ServerResult};
use truecrime_common::protocol::{LoginRequest, RegisterRequest};

/// 重複登録時のレスポンス
pub const DUPLICATE_ACCOUNT: &str = "Username or mail already exists";

/// 認証情報不一致時のレスポンス（メール不明とパスワード不一致で共通）
pub const CREDENTIALS_DO_NOT_MATCH: &str = "Credentials do not match";

fn validate_register(request: &RegisterRequest) -> ServerResult<()> {
    if request.username.trim().is_empty() {
        return Err(ServerError::Validation("username is required".to_string()));
    }
    if request.mail.trim().is_empty() {
        return Err(ServerError::Validation("mail is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(ServerError::Validation("password is required".to_string()));
    }
    if request.password.len() > MAX_PASSWORD_BYTES {
        return Err(ServerError::Validation(format!(
            "password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    Ok(())
}

/// 入力を検証し、ハッシュ化とトークン発行を経てアカウントを作成する
async fn create_account(pool: &SqlitePool, request: RegisterRequest) -> ServerResult<Account> {
    validate_register(&request)?;

    let password_hash = hash_password(&request.password)?;

    crate::db::users::create(
        pool,
        NewAccount {
            username: request.username,
            mail: request.mail,
            password_hash,
            access_token: issue_token(),
        },
    )
    .await
}

/// メールアドレスとパスワードを照合する
///
/// メール不明とパスワード不一致はどちらも
/// `ServerError::Authentication(CREDENTIALS_DO_NOT_MATCH)` になる。
async fn check_credentials(pool: &SqlitePool, request: &LoginRequest) -> ServerResult<Account> {
    let mismatch = || ServerError::Authentication(CREDENTIALS_DO_NOT_MATCH.to_string());

    let Some(account) = crate::db::users::find_by_mail(pool, &request.mail).await? else {
        equalize_missing_account_timing(&request.password);
        tracing::warn!("Login failed: unknown mail");
        return Err(mismatch());
    };

    if !verify_password(&request.password, &account.password_hash)? {
        tracing::warn!("Login failed: wrong password for username={}", account.username);
        return Err(mismatch());
    }

    Ok(account)
}

fn register_failure(error: ServerError) -> Response {
    let message = Some("Could not create account");
    match error {
        ServerError::DuplicateKey(_) => {
            tracing::warn!("Registration rejected: {}", error);
            failure(StatusCode::BAD_REQUEST, DUPLICATE_ACCOUNT, message)
        }
        ServerError::Validation(_) => failure(StatusCode::BAD_REQUEST, error.to_string(), message),
        ServerError::PasswordHash(_) => {
            tracing::error!("Failed to hash password: {}", error);
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                error.to_string(),
                Some("Internal server error"),
            )
        }
        other => {
            tracing::error!("Failed to create account: {}", other);
            failure(StatusCode::BAD_REQUEST, other.to_string(), message)
        }
    }
}

fn login_failure(error: ServerError) -> Response {
    let message = Some("Could not log in");
    match error {
        ServerError::Authentication(reason) => failure(StatusCode::BAD_REQUEST, reason, message),
        ServerError::PasswordHash(_) => {
            tracing::error!("Failed to verify password: {}", error);
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                error.to_string(),
                Some("Internal server error"),
            )
        }
        other => {
            tracing::error!("Failed to log in: {}", other);
            failure(StatusCode::BAD_REQUEST, other.to_string(), message)
        }
    }
}

/// POST /register - アカウント登録
///
/// パスワードをハッシュ化し、新しいアクセストークンを発行してアカウントを作成する
///
/// # Arguments
/// * `State(app_state)` - アプリケーション状態
/// * `payload` - 登録リクエスト（username, mail, password）
///
/// # Returns
/// * `201 Created` - 作成されたアカウント（accessToken含む）
/// * `400 Bad Request` - 入力不備、ユーザー名・メール重複、ストア失敗
/// * `500 Internal Server Error` - パスワードハッシュ化失敗
pub async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Malformed register request: {}", rejection);
        failure(
            StatusCode::BAD_REQUEST,
            rejection.body_text(),
            Some("Could not create account"),
        )
    })?;

    let account = create_account(&app_state.db_pool, request)
        .await
        .map_err(register_failure)?;

    tracing::info!("Account registered: username={}", account.username);

    Ok(success(
        StatusCode::CREATED,
        AccountResponse::from(&account),
        "Account created",
    ))
}

/// POST /login - ログイン
///
/// メールアドレスでアカウントを検索し、パスワードを検証する。
/// トークンは再発行せず、登録時のトークンをそのまま返す。
///
/// # Arguments
/// * `State(app_state)` - アプリケーション状態
/// * `payload` - ログインリクエスト（mail, password）
///
/// # Returns
/// * `200 OK` - アカウント（accessToken含む）
/// * `400 Bad Request` - 認証情報不一致、入力不備、ストア失敗
/// * `500 Internal Server Error` - ハッシュ検証失敗
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Malformed login request: {}", rejection);
        failure(
            StatusCode::BAD_REQUEST,
            rejection.body_text(),
            Some("Could not log in"),
        )
    })?;

    let account = check_credentials(&app_state.db_pool, &request)
        .await
        .map_err(login_failure)?;

    tracing::info!("Account logged in: username={}", account.username);

    Ok(success(
        StatusCode::OK,
        AccountResponse::from(&account),
        "Logged in",
    ))
}
