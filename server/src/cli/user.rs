//! アカウント参照サブコマンド
//!
//! パスワードハッシュとアクセストークンは出力しない。

use clap::Subcommand;
use sqlx::SqlitePool;
use std::io::Write;
use truecrime_common::error::{ServerError, ServerResult};

/// Account commands
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List all accounts
    List,
}

/// サブコマンドを実行し、結果を `out` に書き出す
pub async fn run(
    command: UserCommand,
    pool: &SqlitePool,
    out: &mut impl Write,
) -> ServerResult<()> {
    match command {
        UserCommand::List => {
            let accounts = crate::db::users::list(pool).await?;
            let write_err = |e: std::io::Error| ServerError::Internal(e.to_string());

            writeln!(out, "{:<24} {:<32} {:>9}", "USERNAME", "MAIL", "COMPLETED")
                .map_err(write_err)?;
            for account in &accounts {
                writeln!(
                    out,
                    "{:<24} {:<32} {:>9}",
                    account.username, account.mail, account.completed_count
                )
                .map_err(write_err)?;
            }
            writeln!(out, "{} account(s)", accounts.len()).map_err(write_err)?;
            Ok(())
        }
    }
}
