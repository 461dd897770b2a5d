//! truecrime-server のCLI
//!
//! サブコマンドなしでサーバーを起動する。

pub mod user;

use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use truecrime_common::error::ServerResult;

/// True crime catalog server
#[derive(Parser, Debug)]
#[command(name = "truecrime-server")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    TRUECRIME_HOST                 Bind address (default: 0.0.0.0)
    TRUECRIME_PORT                 Listen port (default: 8080, legacy: PORT)
    TRUECRIME_DATABASE_URL         Database URL (default: sqlite://truecrime.db, legacy: DATABASE_URL)
    TRUECRIME_SEED_CATALOG         Reseed catalog collections at startup (default: true)
    TRUECRIME_LOG_DIR              Log directory (default: ~/.truecrime/logs)
    TRUECRIME_LOG_LEVEL            Log level (default: info, fallback: RUST_LOG)
    TRUECRIME_LOG_RETENTION_DAYS   Days to keep log files (default: 7)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reset catalog collections to the starter entries
    Seed,
    /// Inspect accounts
    User {
        /// Account subcommand
        #[command(subcommand)]
        command: user::UserCommand,
    },
}

/// サブコマンドを実行する
pub async fn run(command: Commands, pool: &SqlitePool) -> ServerResult<()> {
    match command {
        Commands::Seed => {
            let inserted = crate::db::seed::seed_catalog(pool).await?;
            println!("Seeded {} catalog entries", inserted);
            Ok(())
        }
        Commands::User { command } => user::run(command, pool, &mut std::io::stdout()).await,
    }
}
