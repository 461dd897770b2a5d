//! 認証・認可機能
//!
//! パスワードのハッシュ化と検証、アクセストークンの発行、保護ルートのゲート

/// パスワードハッシュ化と検証
pub mod password;

/// アクセストークンの発行
pub mod token;

/// アクセストークン認証ミドルウェア
pub mod middleware;
