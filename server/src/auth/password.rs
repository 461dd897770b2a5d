// パスワードハッシュ化と検証（bcrypt実装）

use bcrypt::{hash, verify};
use once_cell::sync::Lazy;
use truecrime_common::error::{ServerError, ServerResult};

/// パスワードハッシュ化のコスト（12推奨、200-300ms）
const HASH_COST: u32 = 12;

/// bcryptが扱える入力長（これを超える部分は黙って切り捨てられる）
pub const MAX_PASSWORD_BYTES: usize = 72;

/// 存在しないアカウントへのログイン時に検証するダミーハッシュ
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash("timing-equalizer-not-a-password", HASH_COST).ok());

/// パスワードをbcryptでハッシュ化
///
/// 呼び出しごとに新しいソルトを生成するため、同じ入力でも結果は毎回異なる。
///
/// # Arguments
/// * `password` - ハッシュ化するパスワード
///
/// # Returns
/// * `Ok(String)` - bcryptハッシュ文字列（$2b$で始まる）
/// * `Err(ServerError::Validation)` - 72バイトを超えるパスワード
/// * `Err(ServerError::PasswordHash)` - ハッシュ化失敗（設定不備として扱う）
pub fn hash_password(password: &str) -> ServerResult<String> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ServerError::Validation(format!(
            "password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    hash(password, HASH_COST)
        .map_err(|e| ServerError::PasswordHash(format!("Failed to hash password: {}", e)))
}

/// パスワードを検証
///
/// 埋め込まれたソルトとコストで再計算したダイジェストを定数時間で比較する。
///
/// # Arguments
/// * `password` - 検証する平文パスワード
/// * `hash` - bcryptハッシュ文字列
///
/// # Returns
/// * `Ok(true)` - パスワード一致
/// * `Ok(false)` - パスワード不一致（72バイト超の入力は常に不一致）
/// * `Err(ServerError)` - 検証失敗（ハッシュ形式が不正など）
pub fn verify_password(password: &str, hash: &str) -> ServerResult<bool> {
    if password.len() > MAX_PASSWORD_BYTES {
        equalize_missing_account_timing(password);
        return Ok(false);
    }
    verify(password, hash)
        .map_err(|e| ServerError::PasswordHash(format!("Failed to verify password: {}", e)))
}

/// アカウントが見つからなかった場合にも同じコストの検証を行う
///
/// ログインの応答時間からメールアドレスの存在が推測されないようにする。
pub fn equalize_missing_account_timing(password: &str) {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(password, dummy);
    }
}
