//! データベースアクセス層
//!
//! SQLite（sqlx）による永続化。接続プールは `AppState` 経由で注入する。

/// アカウント管理
pub mod users;

/// To-do管理
pub mod todos;

/// カタログのドキュメントストア
pub mod catalog;

/// カタログの初期データ
pub mod seed;

/// データベース初期化・マイグレーション
pub mod migrations;
