//! Google OAuth 응답 DTO

use serde::Deserialize;

/// Google 토큰 교환 엔드포인트 응답
///
/// Authorization Code를 교환하면 받는 페이로드입니다.
/// 여기서 사용하는 것은 userinfo 조회용 `access_token`뿐입니다.
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}
