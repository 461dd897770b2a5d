// アクセストークンの発行

use rand::{rngs::OsRng, RngCore};

/// トークンのバイト長（256ビット）
const TOKEN_BYTES: usize = 32;

/// アクセストークンを発行
///
/// OSのCSPRNGから32バイトを取得し、16進数文字列（64文字）で返す。
/// アカウント作成時に一度だけ呼ばれ、ログインで再発行はしない。
pub fn issue_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
