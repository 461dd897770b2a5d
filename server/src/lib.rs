//! True crime catalog server
//!
//! カタログ参照、アカウント登録・ログイン、アクセストークンで保護されたTo-do

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// 認証・認可機能
pub mod auth;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
}
