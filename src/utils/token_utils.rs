//! 이메일 인증 토큰 생성

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

const VERIFICATION_TOKEN_BYTES: usize = 16;

/// 16바이트 난수를 URL-safe base64(패딩 없음)로 인코딩한 토큰을 생성합니다.
pub fn generate_verification_token() -> String {
    let bytes: [u8; VERIFICATION_TOKEN_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}
