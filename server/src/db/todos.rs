// To-doのCRUD操作（すべて所有アカウントでスコープする）

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use truecrime_common::error::{CommonError, ServerError, ServerResult};
use truecrime_common::types::{Todo, TodoFields};
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, description, category, deadline, priority, completed, created_at FROM todos";

/// To-doを作成
pub async fn create(pool: &SqlitePool, user_id: Uuid, fields: TodoFields) -> ServerResult<Todo> {
    let id = Uuid::new_v4();
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO todos (id, user_id, description, category, deadline, priority, completed, created_at)
         VALUES (?, ?, ?, ?, ?, ?, 0, ?)",
    )
    .bind(id.to_string())
    .bind(user_id.to_string())
    .bind(&fields.description)
    .bind(&fields.category)
    .bind(fields.deadline.map(|dt| dt.to_rfc3339()))
    .bind(&fields.priority)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| ServerError::Database(format!("Failed to create todo: {}", e)))?;

    Ok(Todo {
        id,
        description: fields.description,
        category: fields.category,
        deadline: fields.deadline,
        priority: fields.priority,
        completed: false,
        user: user_id,
        created_at,
    })
}

/// アカウントのTo-do一覧（作成日時の昇順）
pub async fn list_for_user(pool: &SqlitePool, user_id: Uuid) -> ServerResult<Vec<Todo>> {
    let rows = sqlx::query_as::<_, TodoRow>(&format!(
        "{} WHERE user_id = ? ORDER BY created_at ASC",
        SELECT_COLUMNS
    ))
    .bind(user_id.to_string())
    .fetch_all(pool)
    .await
    .map_err(|e| ServerError::Database(format!("Failed to list todos: {}", e)))?;

    rows.into_iter().map(TodoRow::into_todo).collect()
}

/// アカウントのTo-doをIDで検索
pub async fn find_for_user(
    executor: impl SqliteExecutor<'_>,
    user_id: Uuid,
    id: Uuid,
) -> ServerResult<Option<Todo>> {
    let row = sqlx::query_as::<_, TodoRow>(&format!(
        "{} WHERE id = ? AND user_id = ?",
        SELECT_COLUMNS
    ))
    .bind(id.to_string())
    .bind(user_id.to_string())
    .fetch_optional(executor)
    .await
    .map_err(|e| ServerError::Database(format!("Failed to find todo: {}", e)))?;

    row.map(TodoRow::into_todo).transpose()
}

/// To-doの内容を更新
///
/// # Returns
/// * `Ok(Some(Todo))` - 更新後のTo-do
/// * `Ok(None)` - 該当なし（存在しない、または他のアカウントの所有）
pub async fn update_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    id: Uuid,
    fields: TodoFields,
) -> ServerResult<Option<Todo>> {
    let result = sqlx::query(
        "UPDATE todos SET description = ?, category = ?, deadline = ?, priority = ?
         WHERE id = ? AND user_id = ?",
    )
    .bind(&fields.description)
    .bind(&fields.category)
    .bind(fields.deadline.map(|dt| dt.to_rfc3339()))
    .bind(&fields.priority)
    .bind(id.to_string())
    .bind(user_id.to_string())
    .execute(pool)
    .await
    .map_err(|e| ServerError::Database(format!("Failed to update todo: {}", e)))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    find_for_user(pool, user_id, id).await
}

/// 完了フラグを設定し、所有アカウントの完了数を調整する
///
/// フラグの更新と完了数の±1は同じトランザクションで行う。
/// どちらかが失敗した場合は両方ロールバックされる。
///
/// # Returns
/// * `Ok(Some((Todo, changed)))` - 更新後のTo-doと、フラグが実際に変化したか
/// * `Ok(None)` - 該当なし
pub async fn set_completed_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    id: Uuid,
    completed: bool,
) -> ServerResult<Option<(Todo, bool)>> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServerError::Database(format!("Failed to begin transaction: {}", e)))?;

    // 値が変わる場合のみ更新し、変化の有無を rows_affected で判定する
    let result = sqlx::query(
        "UPDATE todos SET completed = ? WHERE id = ? AND user_id = ? AND completed <> ?",
    )
    .bind(completed)
    .bind(id.to_string())
    .bind(user_id.to_string())
    .bind(completed)
    .execute(&mut *tx)
    .await
    .map_err(|e| ServerError::Database(format!("Failed to update todo: {}", e)))?;

    let changed = result.rows_affected() > 0;
    if changed {
        let delta = if completed { 1 } else { -1 };
        crate::db::users::adjust_completed_count(&mut *tx, user_id, delta).await?;
    }

    let todo = find_for_user(&mut *tx, user_id, id).await?;

    tx.commit()
        .await
        .map_err(|e| ServerError::Database(format!("Failed to commit todo update: {}", e)))?;

    Ok(todo.map(|todo| (todo, changed)))
}

/// To-doを削除
///
/// # Returns
/// * `Ok(Some(Todo))` - 削除されたTo-do
/// * `Ok(None)` - 該当なし
pub async fn delete_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    id: Uuid,
) -> ServerResult<Option<Todo>> {
    let Some(todo) = find_for_user(pool, user_id, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
        .bind(id.to_string())
        .bind(user_id.to_string())
        .execute(pool)
        .await
        .map_err(|e| ServerError::Database(format!("Failed to delete todo: {}", e)))?;

    Ok(Some(todo))
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct TodoRow {
    id: String,
    user_id: String,
    description: String,
    category: Option<String>,
    deadline: Option<String>,
    priority: Option<String>,
    completed: bool,
    created_at: String,
}

impl TodoRow {
    fn into_todo(self) -> ServerResult<Todo> {
        let id = Uuid::parse_str(&self.id).map_err(CommonError::from)?;
        let user = Uuid::parse_str(&self.user_id).map_err(CommonError::from)?;
        let created_at = parse_timestamp(&self.created_at)?;
        let deadline = self.deadline.as_deref().map(parse_timestamp).transpose()?;

        Ok(Todo {
            id,
            description: self.description,
            category: self.category,
            deadline,
            priority: self.priority,
            completed: self.completed,
            user,
            created_at,
        })
    }
}

fn parse_timestamp(value: &str) -> ServerResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ServerError::Database(format!("Invalid timestamp '{}': {}", value, e)))
}
