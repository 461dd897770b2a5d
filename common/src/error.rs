//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// UUID parse error
    #[error("UUID parse error: {0}")]
    UuidParse(#[from] uuid::Error),
}

/// Server error type
#[derive(Debug, Error)]
pub enum ServerError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Missing or malformed request fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unique index violation reported by the store (username or mail taken)
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Missing or unknown access token, or mail and password do not match
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Store infrastructure failure
    #[error("Database error: {0}")]
    Database(String),

    /// Password hash error
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// 一意制約違反かどうか
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, ServerError::DuplicateKey(_))
    }

    /// 認証失敗（トークン不明・認証情報不一致）かどうか
    pub fn is_authentication(&self) -> bool {
        matches!(self, ServerError::Authentication(_))
    }
}

/// Result type alias (Server)
pub type ServerResult<T> = Result<T, ServerError>;
