//! 通信プロトコル定義
//!
//! HTTP APIのリクエストボディとレスポンスエンベロープ

use serde::{Deserialize, Serialize};

/// すべてのレスポンスの共通エンベロープ
///
/// 成功時: `{"success": true, "response": <payload>, "message": "..."}`
/// 失敗時: `{"success": false, "response": "<理由>", "message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    /// 成功フラグ
    pub success: bool,
    /// ペイロードまたはエラー内容
    pub response: T,
    /// 人間向けメッセージ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// 成功レスポンス
    pub fn ok(response: T) -> Self {
        Self {
            success: true,
            response,
            message: None,
        }
    }

    /// 失敗レスポンス
    pub fn failure(response: T) -> Self {
        Self {
            success: false,
            response,
            message: None,
        }
    }

    /// メッセージを付与
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// 登録リクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// ユーザー名
    pub username: String,
    /// メールアドレス（形式は検証しない）
    pub mail: String,
    /// パスワード（平文）
    pub password: String,
}

/// ログインリクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// メールアドレス
    pub mail: String,
    /// パスワード（平文）
    pub password: String,
}

/// 完了状態の切り替えリクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedRequest {
    /// 完了フラグ
    pub completed: bool,
}

/// プロフィール更新リクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    /// 新しいアバター（nullでクリア）
    pub avatar: Option<String>,
}
