//! ロギング初期化
//!
//! `tracing` のイベントを標準出力（人間向け）と日付付きJSONラインファイルへ出力する。

use chrono::{Local, NaiveDate};
use std::{
    env,
    fs::{self, OpenOptions},
    io::{self, Error, ErrorKind},
    path::{Path, PathBuf},
    sync::OnceLock,
};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイルベース名（JSON Lines）
pub const LOG_FILE_BASE: &str = "truecrime-server.jsonl";

const DEFAULT_DATA_DIR: &str = ".truecrime";
const LOG_SUBDIR: &str = "logs";
const DEFAULT_RETENTION_DAYS: u32 = 7;
const DEFAULT_LEVEL: &str = "info";

const LOG_DIR_ENV: &str = "TRUECRIME_LOG_DIR";
const LOG_LEVEL_ENV: &str = "TRUECRIME_LOG_LEVEL";
const LOG_RETENTION_DAYS_ENV: &str = "TRUECRIME_LOG_RETENTION_DAYS";
const ALT_LEVEL_ENV: &str = "RUST_LOG";

static LOGGER_GUARD: OnceLock<Result<WorkerGuard, io::Error>> = OnceLock::new();

/// ロギング設定
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    /// ログディレクトリ
    pub dir: PathBuf,
    /// 保持日数
    pub retention_days: u32,
}

impl LogSettings {
    /// 環境変数から読み込む
    ///
    /// `TRUECRIME_LOG_DIR` が未設定なら `~/.truecrime/logs` を使う。
    pub fn from_env() -> io::Result<Self> {
        let dir = match env::var(LOG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => {
                let home = env::var("HOME")
                    .or_else(|_| env::var("USERPROFILE"))
                    .map_err(|_| {
                        Error::new(ErrorKind::NotFound, "Failed to resolve home directory")
                    })?;
                PathBuf::from(home).join(DEFAULT_DATA_DIR).join(LOG_SUBDIR)
            }
        };

        let retention_days = env::var(LOG_RETENTION_DAYS_ENV)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_RETENTION_DAYS);

        Ok(Self {
            dir,
            retention_days,
        })
    }

    /// 指定日のログファイルパス
    pub fn file_path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}.{}", LOG_FILE_BASE, date.format("%Y-%m-%d")))
    }
}

/// ログ出力を初期化する（2回目以降は初回の結果を返す）
pub fn init() -> io::Result<()> {
    match LOGGER_GUARD.get_or_init(|| LogSettings::from_env().and_then(|s| configure(&s))) {
        Ok(_) => Ok(()),
        Err(err) => Err(io::Error::new(err.kind(), err.to_string())),
    }
}

/// 保持期間を過ぎたログファイルを削除し、削除した数を返す
fn cleanup_old_logs(dir: &Path, retention_days: u32, today: NaiveDate) -> io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let cutoff = today - chrono::Duration::days(i64::from(retention_days));
    let prefix = format!("{}.", LOG_FILE_BASE);
    let mut removed = 0;

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(date) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_prefix(&prefix))
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        else {
            continue;
        };

        if date < cutoff && fs::remove_file(&path).is_ok() {
            removed += 1;
        }
    }
    Ok(removed)
}

fn configure(settings: &LogSettings) -> io::Result<WorkerGuard> {
    fs::create_dir_all(&settings.dir)?;

    let today = Local::now().date_naive();
    let removed = cleanup_old_logs(&settings.dir, settings.retention_days, today)?;

    let log_path = settings.file_path_for(today);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let (file_writer, file_guard) = non_blocking(file);

    // 優先順位: TRUECRIME_LOG_LEVEL > RUST_LOG > info
    let env_filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .or_else(|_| EnvFilter::try_from_env(ALT_LEVEL_ENV))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_writer)
        .with_current_span(false)
        .with_span_list(false)
        .with_target(true);

    let stdout_layer = fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(Error::other)?;

    tracing::info!(
        "Logs initialized: {} (removed {} expired files)",
        log_path.display(),
        removed
    );

    Ok(file_guard)
}
