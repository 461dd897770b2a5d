//! 環境変数からのサーバー設定
//!
//! `TRUECRIME_*` を優先し、旧名（`PORT`, `DATABASE_URL`）は警告付きで受け付ける。

use truecrime_common::config::ServerConfig;

/// 環境変数を新名→旧名の順で読む
///
/// 旧名のみ設定されている場合は非推奨の警告を出す。
///
/// # Arguments
/// * `new_name` - 推奨される環境変数名
/// * `old_name` - 非推奨の環境変数名
///
/// # Returns
/// * `Some(value)` - いずれかが設定されている
/// * `None` - どちらも未設定
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    let val = std::env::var(old_name).ok()?;
    tracing::warn!(
        "Environment variable '{}' is deprecated, use '{}' instead",
        old_name,
        new_name
    );
    Some(val)
}

/// 真偽値の環境変数を解釈（1/true/yes/on と 0/false/no/off）
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// 環境変数からサーバー設定を組み立てる
///
/// 未設定・解釈できない値は既定値（[`ServerConfig::default`]）を使う。
pub fn server_config_from_env() -> ServerConfig {
    let defaults = ServerConfig::default();

    let host = std::env::var("TRUECRIME_HOST").unwrap_or(defaults.host);

    let port = match get_env_with_fallback("TRUECRIME_PORT", "PORT") {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid port '{}', using {}", raw, defaults.port);
            defaults.port
        }),
        None => defaults.port,
    };

    let database_url = get_env_with_fallback("TRUECRIME_DATABASE_URL", "DATABASE_URL")
        .unwrap_or(defaults.database_url);

    let seed_catalog = std::env::var("TRUECRIME_SEED_CATALOG")
        .ok()
        .and_then(|raw| parse_flag(&raw))
        .unwrap_or(defaults.seed_catalog);

    ServerConfig {
        host,
        port,
        database_url,
        seed_catalog,
    }
}
