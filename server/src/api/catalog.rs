//! カタログ参照API
//!
//! 認証不要。映画・ドキュメンタリー・ドラマ・ドキュメンタリーシリーズ・ポッドキャスト・書籍

use crate::api::{failure, parse_id, success};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use truecrime_common::types::CatalogKind;

#[allow(clippy::result_large_err)]
fn resolve_kind(collection: &str) -> Result<CatalogKind, Response> {
    CatalogKind::from_collection(collection).ok_or_else(|| {
        failure(
            StatusCode::NOT_FOUND,
            format!("Unknown collection: {}", collection),
            Some("Collection not found"),
        )
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// GET /:collection - コレクション一覧
///
/// # Returns
/// * `200 OK` - エントリ一覧（追加順）
/// * `400 Bad Request` - ストア失敗
/// * `404 Not Found` - 未知のコレクション
pub async fn list_entries(
    State(app_state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Response, Response> {
    let kind = resolve_kind(&collection)?;

    let entries = crate::db::catalog::list(&app_state.db_pool, kind)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list {}: {}", kind.collection(), e);
            failure(
                StatusCode::BAD_REQUEST,
                e.to_string(),
                Some(&format!("Did not find {} list", kind.collection())),
            )
        })?;

    Ok(success(
        StatusCode::OK,
        entries,
        &format!("Successfully found {} list", kind.collection()),
    ))
}

/// GET /:collection/:id - 単一エントリ
///
/// # Returns
/// * `200 OK` - エントリ
/// * `400 Bad Request` - 不正なID、ストア失敗
/// * `404 Not Found` - 未知のコレクションまたはエントリなし
pub async fn get_entry(
    State(app_state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Response, Response> {
    let kind = resolve_kind(&collection)?;
    let failed = format!("Failed to find the single {}", kind.singular());
    let id = parse_id(&id, &failed)?;

    let entry = crate::db::catalog::find_by_id(&app_state.db_pool, kind, id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find {} {}: {}", kind.singular(), id, e);
            failure(StatusCode::BAD_REQUEST, e.to_string(), Some(&failed))
        })?;

    match entry {
        Some(entry) => Ok(success(
            StatusCode::OK,
            entry,
            &format!("Found single {}", kind.singular()),
        )),
        None => Err(failure(
            StatusCode::NOT_FOUND,
            format!("{} not found", capitalize(kind.singular())),
            Some(&failed),
        )),
    }
}
