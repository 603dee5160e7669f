//! JWT 인증 토큰 클레임 및 토큰 쌍 구조체
//!
//! RFC 7519 JWT 표준 클레임과 용도별 토큰 2종을 정의합니다.
//! 두 토큰은 구조적으로 유사하지만 서로 다른 비밀키로 서명되고 수명이 다릅니다.

use serde::{Deserialize, Serialize};

/// 액세스 토큰 클레임
///
/// 요청별 인가에 사용되는 단기 토큰의 페이로드입니다.
/// 개인정보 보호를 위해 최소한의 정보만 포함하며,
/// 비밀번호 해시 등 자격 증명 관련 데이터는 절대 포함하지 않습니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    /// 사용자 이메일
    pub email: String,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// 리프레시 토큰 클레임
///
/// 액세스 토큰 재발급에만 사용되는 장기 토큰의 페이로드입니다.
/// `token_version`은 발급 시점의 사용자 카운터 값이며, 재발급 시
/// 현재 값과 일치해야 합니다. 카운터가 증가하면 기존 리프레시 토큰은
/// 전부 무효화됩니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    /// 발급 시점의 토큰 버전
    pub token_version: i64,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// JWT 토큰 쌍 구조체
///
/// 로그인/가입 성공 시 발급되는 토큰 집합입니다.
/// 액세스 토큰은 응답 본문으로, 리프레시 토큰은 HttpOnly 쿠키로 전달됩니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
