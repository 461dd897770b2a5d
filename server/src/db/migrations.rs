// データベースの初期化（接続・マイグレーション）と終了処理

use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use truecrime_common::error::{ServerError, ServerResult};

/// SQLiteデータベース接続プールを作成してマイグレーションを実行
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite://truecrime.db", "sqlite::memory:"）
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(ServerError)` - 初期化失敗
pub async fn initialize_database(database_url: &str) -> ServerResult<SqlitePool> {
    // データベースファイルが存在しない場合は作成
    if !Sqlite::database_exists(database_url)
        .await
        .map_err(|e| ServerError::Database(format!("Failed to check database: {}", e)))?
    {
        tracing::info!("Creating database: {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to create database: {}", e)))?;
    }

    let pool = SqlitePool::connect(database_url)
        .await
        .map_err(|e| ServerError::Database(format!("Failed to connect to database: {}", e)))?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
///
/// # Arguments
/// * `pool` - データベース接続プール
pub async fn run_migrations(pool: &SqlitePool) -> ServerResult<()> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| ServerError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// 接続プールを閉じる
///
/// 実行中のクエリの完了を待ってから全接続を切断する。
pub async fn close_database(pool: &SqlitePool) {
    tracing::info!("Closing database connections");
    pool.close().await;
}
