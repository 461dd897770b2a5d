//! 設定管理
//!
//! ServerConfig設定構造体

use serde::{Deserialize, Serialize};

/// サーバー設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// データベースURL (デフォルト: "sqlite://truecrime.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// 起動時にカタログを初期データで作り直す (デフォルト: true)
    #[serde(default = "default_seed_catalog")]
    pub seed_catalog: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "sqlite://truecrime.db".to_string()
}

fn default_seed_catalog() -> bool {
    true
}

impl ServerConfig {
    /// バインドアドレス（host:port）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            seed_catalog: default_seed_catalog(),
        }
    }
}
