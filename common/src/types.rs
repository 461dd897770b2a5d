//! 共通型定義
//!
//! カタログ（映画・ドキュメンタリー・シリーズ・ポッドキャスト・書籍）とTo-doの型

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// カタログのコレクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogKind {
    /// 映画
    Movies,
    /// ドキュメンタリー
    Documentaries,
    /// ドラマシリーズ
    DramaSeries,
    /// ドキュメンタリーシリーズ
    DocumentarySeries,
    /// ポッドキャスト
    Podcasts,
    /// 書籍
    Books,
}

impl CatalogKind {
    /// すべてのコレクション
    pub const ALL: [CatalogKind; 6] = [
        CatalogKind::Movies,
        CatalogKind::Documentaries,
        CatalogKind::DramaSeries,
        CatalogKind::DocumentarySeries,
        CatalogKind::Podcasts,
        CatalogKind::Books,
    ];

    /// コレクション名（URLパス・ストアのキーを兼ねる）
    pub fn collection(self) -> &'static str {
        match self {
            CatalogKind::Movies => "movies",
            CatalogKind::Documentaries => "documentaries",
            CatalogKind::DramaSeries => "drama-series",
            CatalogKind::DocumentarySeries => "documentary-series",
            CatalogKind::Podcasts => "podcasts",
            CatalogKind::Books => "books",
        }
    }

    /// 単数形の表示名
    pub fn singular(self) -> &'static str {
        match self {
            CatalogKind::Movies => "movie",
            CatalogKind::Documentaries => "documentary",
            CatalogKind::DramaSeries => "drama series",
            CatalogKind::DocumentarySeries => "documentary series",
            CatalogKind::Podcasts => "podcast",
            CatalogKind::Books => "book",
        }
    }

    /// コレクション名から解決
    pub fn from_collection(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.collection() == name)
    }
}

/// 映画
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// タイトル
    pub title: String,
    /// スウェーデン語タイトル
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swedish_title: Option<String>,
    /// 公開日
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<NaiveDate>,
    /// あらすじ
    pub synopsis: String,
    /// 監督
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// 出演者
    #[serde(default)]
    pub cast: Vec<String>,
    /// 評価
    pub rating: f64,
    /// タグ
    pub tags: Vec<String>,
    /// 画像のURL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// ドキュメンタリー
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Documentary {
    /// タイトル
    pub title: String,
    /// スウェーデン語タイトル
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swedish_title: Option<String>,
    /// 公開日
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<NaiveDate>,
    /// あらすじ
    pub synopsis: String,
    /// 監督
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// 評価
    pub rating: f64,
    /// タグ
    pub tags: Vec<String>,
    /// 画像のURL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// ドラマシリーズ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DramaSeries {
    /// タイトル
    pub title: String,
    /// スウェーデン語タイトル
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swedish_title: Option<String>,
    /// 公開日
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<NaiveDate>,
    /// あらすじ
    pub synopsis: String,
    /// 監督
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// 出演者
    #[serde(default)]
    pub cast: Vec<String>,
    /// シーズン数
    pub seasons: u32,
    /// 評価
    pub rating: f64,
    /// タグ
    pub tags: Vec<String>,
    /// 画像のURL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// ドキュメンタリーシリーズ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentarySeries {
    /// タイトル
    pub title: String,
    /// スウェーデン語タイトル
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swedish_title: Option<String>,
    /// 公開日
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<NaiveDate>,
    /// あらすじ
    pub synopsis: String,
    /// シーズン数
    pub seasons: u32,
    /// 評価
    pub rating: f64,
    /// 監督
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// タグ
    pub tags: Vec<String>,
    /// 画像のURL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// ポッドキャスト
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    /// タイトル
    pub title: String,
    /// ホスト
    pub hosts: Vec<String>,
    /// 初回配信日
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_aired: Option<NaiveDate>,
    /// あらすじ
    pub synopsis: String,
    /// 制作
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produced_by: Option<String>,
    /// 公式サイト
    pub website: String,
    /// 評価（ポッドキャストのみ任意）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// タグ
    pub tags: Vec<String>,
    /// 画像のURL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// 書籍
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// タイトル
    pub title: String,
    /// スウェーデン語タイトル
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swedish_title: Option<String>,
    /// 著者
    pub author: String,
    /// あらすじ
    pub synopsis: String,
    /// 公開日
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<NaiveDate>,
    /// ISBN
    #[serde(rename = "ISBN")]
    pub isbn: u64,
    /// 評価
    pub rating: f64,
    /// タグ
    pub tags: Vec<String>,
    /// 画像のURL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// カタログのエントリ（ストアのドキュメント + ID）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// ID
    pub id: Uuid,
    /// コレクション固有の項目
    #[serde(flatten)]
    pub document: serde_json::Map<String, serde_json::Value>,
}

/// To-do
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// ID
    pub id: Uuid,
    /// 内容
    pub description: String,
    /// カテゴリ
    pub category: Option<String>,
    /// 期限
    pub deadline: Option<DateTime<Utc>>,
    /// 優先度
    pub priority: Option<String>,
    /// 完了フラグ
    pub completed: bool,
    /// 所有アカウントのID
    pub user: Uuid,
    /// 作成日時
    pub created_at: DateTime<Utc>,
}

/// To-doの入力項目（作成・更新共通）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TodoFields {
    /// 内容
    pub description: String,
    /// カテゴリ
    #[serde(default)]
    pub category: Option<String>,
    /// 期限
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// 優先度
    #[serde(default)]
    pub priority: Option<String>,
}
