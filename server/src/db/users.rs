// アカウントの永続化（作成・検索・部分更新）

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use truecrime_common::auth::{Account, AccountPatch, NewAccount};
use truecrime_common::error::{CommonError, ServerError, ServerResult};
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "SELECT id, username, mail, password_hash, access_token, avatar, completed_count, created_at FROM users";

/// アカウントを作成
///
/// 一意性の事前チェックは行わない。username / mail の重複は
/// ストアの一意インデックスが検出し、`ServerError::DuplicateKey` になる。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `account` - ハッシュ化・トークン発行済みの入力
///
/// # Returns
/// * `Ok(Account)` - 作成されたアカウント
/// * `Err(ServerError::DuplicateKey)` - username または mail が既に存在
/// * `Err(ServerError::Database)` - その他の失敗
pub async fn create(pool: &SqlitePool, account: NewAccount) -> ServerResult<Account> {
    let id = Uuid::new_v4();
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO users (id, username, mail, password_hash, access_token, avatar, completed_count, created_at)
         VALUES (?, ?, ?, ?, ?, NULL, 0, ?)",
    )
    .bind(id.to_string())
    .bind(&account.username)
    .bind(&account.mail)
    .bind(&account.password_hash)
    .bind(&account.access_token)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, "Failed to create user"))?;

    Ok(Account {
        id,
        username: account.username,
        mail: account.mail,
        password_hash: account.password_hash,
        access_token: account.access_token,
        avatar: None,
        completed_count: 0,
        created_at,
    })
}

/// アクセストークンでアカウントを検索（完全一致）
///
/// # Returns
/// * `Ok(Some(Account))` - アカウントが見つかった
/// * `Ok(None)` - 該当なし
/// * `Err(ServerError)` - 検索失敗
pub async fn find_by_token(pool: &SqlitePool, token: &str) -> ServerResult<Option<Account>> {
    let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE access_token = ?", SELECT_COLUMNS))
        .bind(token)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerError::Database(format!("Failed to find user by token: {}", e)))?;

    row.map(UserRow::into_account).transpose()
}

/// メールアドレスでアカウントを検索
pub async fn find_by_mail(pool: &SqlitePool, mail: &str) -> ServerResult<Option<Account>> {
    let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE mail = ?", SELECT_COLUMNS))
        .bind(mail)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerError::Database(format!("Failed to find user by mail: {}", e)))?;

    row.map(UserRow::into_account).transpose()
}

/// ユーザー名でアカウントを検索
pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> ServerResult<Option<Account>> {
    let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE username = ?", SELECT_COLUMNS))
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerError::Database(format!("Failed to find user: {}", e)))?;

    row.map(UserRow::into_account).transpose()
}

/// IDでアカウントを検索
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> ServerResult<Option<Account>> {
    let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerError::Database(format!("Failed to find user: {}", e)))?;

    row.map(UserRow::into_account).transpose()
}

/// すべてのアカウントを取得（作成日時の昇順）
pub async fn list(pool: &SqlitePool) -> ServerResult<Vec<Account>> {
    let rows = sqlx::query_as::<_, UserRow>(&format!("{} ORDER BY created_at ASC", SELECT_COLUMNS))
        .fetch_all(pool)
        .await
        .map_err(|e| ServerError::Database(format!("Failed to list users: {}", e)))?;

    rows.into_iter().map(UserRow::into_account).collect()
}

/// アカウントを部分更新
///
/// 単一のUPDATE文で適用するため、カウンタの増減は同時リクエスト間でも失われない。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `id` - アカウントID
/// * `patch` - 更新内容（Noneの項目は変更なし）
///
/// # Returns
/// * `Ok(Account)` - 更新後のアカウント
/// * `Err(ServerError::NotFound)` - アカウントが存在しない
/// * `Err(ServerError::Database)` - 更新失敗
pub async fn update_by_id(
    pool: &SqlitePool,
    id: Uuid,
    patch: AccountPatch,
) -> ServerResult<Account> {
    if !patch.is_empty() {
        let (set_avatar, avatar) = match patch.avatar {
            Some(avatar) => (true, avatar),
            None => (false, None),
        };

        let result = sqlx::query(
            "UPDATE users
             SET avatar = CASE WHEN ? THEN ? ELSE avatar END,
                 completed_count = MAX(0, completed_count + ?)
             WHERE id = ?",
        )
        .bind(set_avatar)
        .bind(avatar)
        .bind(patch.completed_delta.unwrap_or(0))
        .bind(id.to_string())
        .execute(pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update user"))?;

        if result.rows_affected() == 0 {
            return Err(ServerError::NotFound(format!("User not found: {}", id)));
        }
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("User not found: {}", id)))
}

/// 完了数を delta だけ増減する（0未満にはならない）
///
/// 呼び出し側のトランザクション内で使う。
pub async fn adjust_completed_count(
    conn: &mut SqliteConnection,
    id: Uuid,
    delta: i64,
) -> ServerResult<()> {
    let result = sqlx::query(
        "UPDATE users SET completed_count = MAX(0, completed_count + ?) WHERE id = ?",
    )
    .bind(delta)
    .bind(id.to_string())
    .execute(conn)
    .await
    .map_err(|e| map_write_error(e, "Failed to update completed count"))?;

    if result.rows_affected() == 0 {
        return Err(ServerError::NotFound(format!("User not found: {}", id)));
    }
    Ok(())
}

/// 書き込みエラーを分類する（一意制約違反は DuplicateKey）
fn map_write_error(error: sqlx::Error, context: &str) -> ServerError {
    match error.as_database_error() {
        Some(db_error) if db_error.is_unique_violation() => {
            ServerError::DuplicateKey(db_error.message().to_string())
        }
        _ => ServerError::Database(format!("{}: {}", context, error)),
    }
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    mail: String,
    password_hash: String,
    access_token: String,
    avatar: Option<String>,
    completed_count: i64,
    created_at: String,
}

impl UserRow {
    fn into_account(self) -> ServerResult<Account> {
        let id = Uuid::parse_str(&self.id).map_err(CommonError::from)?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| ServerError::Database(format!("Invalid created_at: {}", e)))?
            .with_timezone(&Utc);

        Ok(Account {
            id,
            username: self.username,
            mail: self.mail,
            password_hash: self.password_hash,
            access_token: self.access_token,
            avatar: self.avatar,
            completed_count: self.completed_count,
            created_at,
        })
    }
}
