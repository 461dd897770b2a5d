// カタログのドキュメントストア
//
// コレクション名ごとにJSONドキュメントを保存する。スキーマはドキュメント側の型が持つ。

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use truecrime_common::error::{CommonError, ServerError, ServerResult};
use truecrime_common::types::{CatalogEntry, CatalogKind};
use uuid::Uuid;

/// ドキュメントを追加
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `kind` - コレクション
/// * `document` - 保存するドキュメント（JSONオブジェクトにシリアライズされる型）
///
/// # Returns
/// * `Ok(CatalogEntry)` - 保存されたエントリ
/// * `Err(ServerError)` - シリアライズまたは保存の失敗
pub async fn insert<T: Serialize>(
    pool: &SqlitePool,
    kind: CatalogKind,
    document: &T,
) -> ServerResult<CatalogEntry> {
    let document = match serde_json::to_value(document).map_err(CommonError::from)? {
        Value::Object(map) => map,
        other => {
            return Err(ServerError::Validation(format!(
                "Catalog document must be a JSON object, got {}",
                other
            )))
        }
    };

    let id = Uuid::new_v4();
    let body = serde_json::to_string(&document).map_err(CommonError::from)?;

    sqlx::query(
        "INSERT INTO catalog_entries (id, collection, document, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(kind.collection())
    .bind(body)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| ServerError::Database(format!("Failed to insert {}: {}", kind.singular(), e)))?;

    Ok(CatalogEntry { id, document })
}

/// コレクションの全エントリ（追加順）
pub async fn list(pool: &SqlitePool, kind: CatalogKind) -> ServerResult<Vec<CatalogEntry>> {
    let rows = sqlx::query_as::<_, CatalogRow>(
        "SELECT id, document FROM catalog_entries WHERE collection = ? ORDER BY created_at ASC",
    )
    .bind(kind.collection())
    .fetch_all(pool)
    .await
    .map_err(|e| ServerError::Database(format!("Failed to list {}: {}", kind.collection(), e)))?;

    rows.into_iter().map(CatalogRow::into_entry).collect()
}

/// IDでエントリを検索
pub async fn find_by_id(
    pool: &SqlitePool,
    kind: CatalogKind,
    id: Uuid,
) -> ServerResult<Option<CatalogEntry>> {
    let row = sqlx::query_as::<_, CatalogRow>(
        "SELECT id, document FROM catalog_entries WHERE collection = ? AND id = ?",
    )
    .bind(kind.collection())
    .bind(id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerError::Database(format!("Failed to find {}: {}", kind.singular(), e)))?;

    row.map(CatalogRow::into_entry).transpose()
}

/// コレクションを空にする
///
/// # Returns
/// * `Ok(u64)` - 削除した件数
pub async fn clear(pool: &SqlitePool, kind: CatalogKind) -> ServerResult<u64> {
    let result = sqlx::query("DELETE FROM catalog_entries WHERE collection = ?")
        .bind(kind.collection())
        .execute(pool)
        .await
        .map_err(|e| {
            ServerError::Database(format!("Failed to clear {}: {}", kind.collection(), e))
        })?;

    Ok(result.rows_affected())
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct CatalogRow {
    id: String,
    document: String,
}

impl CatalogRow {
    fn into_entry(self) -> ServerResult<CatalogEntry> {
        let id = Uuid::parse_str(&self.id).map_err(CommonError::from)?;
        let document: Map<String, Value> =
            serde_json::from_str(&self.document).map_err(CommonError::from)?;
        Ok(CatalogEntry { id, document })
    }
}
