//! # Authentication Configuration Module
//!
//! JWT 토큰, Google OAuth, OAuth state 검증 등 인증 관련 설정을 관리하는 모듈입니다.
//! 모든 비밀값은 환경변수로만 공급되며, 필수값 누락 시 프로세스가 시작되지 않습니다
//! ([`crate::config::validate_required_env`] 참조).
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! # JWT 토큰 설정 (두 비밀키는 반드시 서로 달라야 합니다)
//! export JWT_ACCESS_SECRET="your-access-token-secret"
//! export JWT_REFRESH_SECRET="your-refresh-token-secret"
//!
//! # Google OAuth 설정
//! export GOOGLE_CLIENT_ID="your-client-id.apps.googleusercontent.com"
//! export GOOGLE_CLIENT_SECRET="your-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/api/auth/google/callback"
//! ```
//!
//! ## 선택적 환경 변수
//!
//! ```bash
//! export ACCESS_TOKEN_TTL_MINUTES="15"     # 액세스 토큰 수명 (기본 15분)
//! export REFRESH_TOKEN_TTL_DAYS="7"        # 리프레시 토큰 수명 (기본 7일)
//! export OAUTH_STATE_SECRET="state-secret" # OAuth state 서명 키
//! export OAUTH_STATE_TIMEOUT_MINUTES="10"  # OAuth state 유효 시간
//! ```
//!
//! ## 키 생성 예제
//!
//! ```bash
//! openssl rand -base64 32
//! ```

use std::env;

/// JSON Web Token (JWT) 관련 설정을 관리하는 구조체
///
/// 액세스 토큰과 리프레시 토큰은 구조는 같지만 서로 다른 비밀키로 서명되고
/// 수명이 다릅니다. 액세스 토큰은 요청별 인가에, 리프레시 토큰은
/// 액세스 토큰 재발급에만 사용됩니다.
pub struct JwtConfig;

impl JwtConfig {
    /// 액세스 토큰 서명에 사용할 비밀키를 반환합니다.
    ///
    /// # Panics
    ///
    /// `JWT_ACCESS_SECRET` 환경변수가 설정되지 않은 경우.
    pub fn access_secret() -> String {
        env::var("JWT_ACCESS_SECRET").expect("JWT_ACCESS_SECRET must be set")
    }

    /// 리프레시 토큰 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 액세스 토큰 비밀키와 반드시 달라야 하며, 같을 경우 시작 검증에서
    /// 프로세스가 종료됩니다.
    ///
    /// # Panics
    ///
    /// `JWT_REFRESH_SECRET` 환경변수가 설정되지 않은 경우.
    pub fn refresh_secret() -> String {
        env::var("JWT_REFRESH_SECRET").expect("JWT_REFRESH_SECRET must be set")
    }

    /// 액세스 토큰 만료 시간(분)을 반환합니다. 기본값 15분.
    pub fn access_expiration_minutes() -> i64 {
        env::var("ACCESS_TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .unwrap_or(15)
    }

    /// 리프레시 토큰 만료 시간(일)을 반환합니다. 기본값 7일.
    ///
    /// 리프레시 쿠키의 max-age에도 같은 값이 사용됩니다.
    pub fn refresh_expiration_days() -> i64 {
        env::var("REFRESH_TOKEN_TTL_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7)
    }
}

/// Google OAuth 2.0 설정을 관리하는 구조체
///
/// Google Cloud Console에서 생성한 OAuth 2.0 클라이언트 정보를 관리합니다.
/// `client_secret`은 서버 사이드에서만 사용되며 절대 로그에 출력하지 않습니다.
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    /// Google OAuth Client ID를 반환합니다.
    ///
    /// # Panics
    ///
    /// `GOOGLE_CLIENT_ID` 환경변수가 설정되지 않은 경우.
    pub fn client_id() -> String {
        env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID must be set")
    }

    /// Google OAuth Client Secret을 반환합니다.
    ///
    /// # Panics
    ///
    /// `GOOGLE_CLIENT_SECRET` 환경변수가 설정되지 않은 경우.
    pub fn client_secret() -> String {
        env::var("GOOGLE_CLIENT_SECRET").expect("GOOGLE_CLIENT_SECRET must be set")
    }

    /// OAuth 인증 완료 후 Google이 리디렉션할 콜백 URI를 반환합니다.
    ///
    /// Google Cloud Console의 승인된 리디렉션 URI 목록에 등록되어 있어야 합니다.
    ///
    /// # Panics
    ///
    /// `GOOGLE_REDIRECT_URI` 환경변수가 설정되지 않은 경우.
    pub fn redirect_uri() -> String {
        env::var("GOOGLE_REDIRECT_URI").expect("GOOGLE_REDIRECT_URI must be set")
    }

    /// Google OAuth 인증 엔드포인트 URI (기본값 제공)
    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/auth".to_string())
    }

    /// Google OAuth 토큰 교환 엔드포인트 URI (기본값 제공)
    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    /// Google 사용자 정보 조회 엔드포인트 URI (기본값 제공)
    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string())
    }
}

/// OAuth 공통 보안 설정
///
/// CSRF 방지용 state 매개변수의 서명 키와 유효 시간을 관리합니다.
pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth state 서명용 비밀키를 반환합니다.
    ///
    /// 환경변수 미설정 시 개발용 기본값을 사용하며 경고를 출력합니다.
    pub fn state_secret() -> String {
        env::var("OAUTH_STATE_SECRET").unwrap_or_else(|_| {
            log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
            "oauth-state-secret".to_string()
        })
    }

    /// OAuth state의 최대 유효 시간(분)을 반환합니다. 기본값 10분.
    ///
    /// 사용자가 동의 화면에서 머무를 수 있는 최대 시간을 제한합니다.
    pub fn state_timeout_minutes() -> i64 {
        env::var("OAUTH_STATE_TIMEOUT_MINUTES")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }
}

/// 지원하는 인증 공급자를 나타내는 열거형
///
/// 사용자 레코드의 `auth_provider` 필드에 저장되며, 어느 자격 증명 경로가
/// 유효한지를 결정합니다. 로컬 계정은 비밀번호 해시를, Google 계정은
/// 연동된 `google_id`를 검증 대상으로 합니다.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 로컬 이메일/비밀번호 인증
    Local,

    /// Google OAuth 2.0 인증
    Google,
}

impl AuthProvider {
    /// 문자열에서 AuthProvider를 생성합니다 (대소문자 무관).
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    /// AuthProvider를 소문자 문자열로 변환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("local").unwrap(), AuthProvider::Local);
        assert_eq!(
            AuthProvider::from_str("google").unwrap(),
            AuthProvider::Google
        );

        // 대소문자 무관 테스트
        assert_eq!(
            AuthProvider::from_str("GOOGLE").unwrap(),
            AuthProvider::Google
        );
        assert_eq!(AuthProvider::from_str("Local").unwrap(), AuthProvider::Local);

        // 지원하지 않는 프로바이더 테스트
        assert!(AuthProvider::from_str("facebook").is_err());
        assert!(AuthProvider::from_str("unknown").is_err());
    }

    #[test]
    fn test_auth_provider_as_string() {
        assert_eq!(AuthProvider::Local.as_str(), "local");
        assert_eq!(AuthProvider::Google.as_str(), "google");
    }

    #[test]
    fn test_auth_provider_roundtrip() {
        for &provider_str in &["local", "google"] {
            let provider = AuthProvider::from_str(provider_str).unwrap();
            assert_eq!(provider.as_str(), provider_str);
        }
    }

    #[test]
    fn test_auth_provider_serialization() {
        // 저장 포맷은 소문자 문자열이어야 합니다
        let json = serde_json::to_string(&AuthProvider::Google).unwrap();
        assert_eq!(json, "\"google\"");

        let deserialized: AuthProvider = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(deserialized, AuthProvider::Local);
    }
}
