// 認証関連のデータモデル

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// アカウント
///
/// `password_hash` と `access_token` はストア内部の値。
/// レスポンスには [`AccountResponse`] を使うこと。
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// ID
    pub id: Uuid,
    /// ユーザー名（一意）
    pub username: String,
    /// メールアドレス（一意）
    pub mail: String,
    /// bcryptハッシュ
    pub password_hash: String,
    /// アクセストークン（一意、64桁の16進数）
    pub access_token: String,
    /// アバター画像のURL
    pub avatar: Option<String>,
    /// 完了済みTo-do数
    pub completed_count: i64,
    /// 作成日時
    pub created_at: DateTime<Utc>,
}

/// アカウント作成時の入力（ハッシュ化・トークン発行済み）
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// ユーザー名（一意）
    pub username: String,
    /// メールアドレス（一意）
    pub mail: String,
    /// bcryptハッシュ
    pub password_hash: String,
    /// アクセストークン（一意、64桁の16進数）
    pub access_token: String,
}

/// アカウントの部分更新
///
/// 認証情報（パスワード・トークン）は更新対象に含めない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    /// 新しいアバター（`Some(None)` でクリア）
    pub avatar: Option<Option<String>>,
    /// 完了済みTo-do数の増減（結果は0未満にならない）
    pub completed_delta: Option<i64>,
}

impl AccountPatch {
    /// 変更項目がない場合はtrue
    pub fn is_empty(&self) -> bool {
        self.avatar.is_none() && self.completed_delta.is_none()
    }
}

/// 登録・ログインのレスポンス（password_hash除外）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// ユーザー名（一意）
    pub username: String,
    /// ID
    pub id: String,
    /// メールアドレス（一意）
    pub mail: String,
    /// アクセストークン（一意、64桁の16進数）
    pub access_token: String,
    /// アバター画像のURL
    pub avatar: Option<String>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        AccountResponse {
            username: account.username.clone(),
            id: account.id.to_string(),
            mail: account.mail.clone(),
            access_token: account.access_token.clone(),
            avatar: account.avatar.clone(),
        }
    }
}

/// プロフィールレスポンス（トークン除外、カウンタ付き）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// ユーザー名（一意）
    pub username: String,
    /// ID
    pub id: String,
    /// メールアドレス（一意）
    pub mail: String,
    /// アバター画像のURL
    pub avatar: Option<String>,
    /// 完了済みTo-do数
    pub completed_count: i64,
    /// 作成日時
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for ProfileResponse {
    fn from(account: &Account) -> Self {
        ProfileResponse {
            username: account.username.clone(),
            id: account.id.to_string(),
            mail: account.mail.clone(),
            avatar: account.avatar.clone(),
            completed_count: account.completed_count,
            created_at: account.created_at,
        }
    }
}
