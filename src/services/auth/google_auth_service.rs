//! # Google OAuth 2.0 인증 서비스
//!
//! Google OAuth 2.0 Authorization Code Flow를 통한 소셜 로그인 기능을 제공합니다.
//!
//! ## 인증 플로우
//!
//! 1. `GET /api/auth/google` → state를 포함한 동의 화면 URL로 302 리다이렉트
//! 2. 사용자가 Google에서 인증 → 콜백 URI로 `code`, `state` 전달
//! 3. state 검증 → code를 액세스 토큰으로 교환 → userinfo 조회
//! 4. 신원 해석: `google_id` 조회 → 이메일 조회(충돌/연동 판정) → 신규 생성
//! 5. 자체 JWT 토큰 쌍 발급 후 프론트엔드로 리다이렉트
//!
//! ## 계정 해석 정책
//!
//! ```text
//! google_id 일치 ───────────────► 로그인
//! 이메일 일치 + 로컬 계정 ──────► 409 충돌 (자동 병합 금지)
//! 이메일 일치 + google, id 없음 ► 원자적 연동 후 로그인
//! 이메일 일치 + 다른 google id ► 409 충돌
//! 일치 없음 ────────────────────► 신규 생성 (비밀번호 자격 증명 없음)
//! ```
//!
//! ## 보안 특징
//!
//! - **CSRF 방지**: 자체 검증형 서명 state
//!   (`timestamp:nonce:sha256(timestamp:nonce:secret)`, base64url).
//!   서버 측 세션 저장 없이 위조와 재사용 시간 초과를 검증합니다.
//! - **에러 정보 제한**: 플로우 실패의 상세 내용은 서버 로그에만 남기고,
//!   클라이언트는 불투명한 에러 코드와 함께 로그인 페이지로 리다이렉트됩니다.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{AuthProvider, GoogleOAuthConfig, OAuthConfig};
use crate::core::errors::AppError;
use crate::domain::dto::users::response::GoogleTokenResponse;
use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::GoogleUserInfo;
use crate::repositories::users::user_repo::UserRepository;
use crate::utils::string_utils::{clean_optional_string, normalize_email};

/// 이메일 충돌 시 클라이언트에 전달되는 메시지
const PROVIDER_CONFLICT_MESSAGE: &str = "Email already registered with another provider";

/// Google OAuth 전략 설정
///
/// 시작 시점에 환경변수에서 한 번 읽어 서비스에 담기는 값들입니다.
#[derive(Debug, Clone)]
pub struct GoogleOAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
    pub state_secret: String,
    pub state_timeout_minutes: i64,
}

impl GoogleOAuthSettings {
    /// 환경 설정에서 전략 설정을 구성합니다.
    ///
    /// 필수 환경변수는 시작 검증을 통과한 상태여야 합니다.
    pub fn from_env() -> Self {
        Self {
            client_id: GoogleOAuthConfig::client_id(),
            client_secret: GoogleOAuthConfig::client_secret(),
            redirect_uri: GoogleOAuthConfig::redirect_uri(),
            auth_uri: GoogleOAuthConfig::auth_uri(),
            token_uri: GoogleOAuthConfig::token_uri(),
            userinfo_uri: GoogleOAuthConfig::userinfo_uri(),
            state_secret: OAuthConfig::state_secret(),
            state_timeout_minutes: OAuthConfig::state_timeout_minutes(),
        }
    }
}

/// Google OAuth 2.0 인증 서비스
///
/// 시작 시점에 설정과 함께 한 번 생성되어 라우팅 계층에 주입되는
/// 명시적 전략 객체입니다. 전역 레지스트리에 등록되지 않습니다.
pub struct GoogleAuthService {
    settings: GoogleOAuthSettings,
    user_repo: Arc<UserRepository>,
    http: reqwest::Client,
}

impl GoogleAuthService {
    pub fn new(settings: GoogleOAuthSettings, user_repo: Arc<UserRepository>) -> Self {
        Self {
            settings,
            user_repo,
            http: reqwest::Client::new(),
        }
    }

    /// Google 동의 화면으로 보낼 Authorization URL을 생성합니다.
    ///
    /// CSRF 방지용 서명 state가 포함됩니다.
    pub fn authorize_url(&self) -> Result<String, AppError> {
        let state = generate_oauth_state(&self.settings);
        Ok(build_authorize_url(&self.settings, &state))
    }

    /// Authorization Code를 사용하여 사용자 인증 및 계정 해석을 수행합니다.
    ///
    /// # 처리 단계
    ///
    /// 1. state 검증 (위조/시간 초과)
    /// 2. code → Google 액세스 토큰 교환
    /// 3. userinfo 조회로 신원 단언 획득
    /// 4. 로컬 사용자 레코드 해석 (조회/연동/생성)
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - state 검증 실패
    /// * `AppError::ConflictError` - 이메일이 다른 프로바이더에 묶여 있음
    /// * `AppError::ExternalServiceError` - Google API 통신 오류
    pub async fn authenticate_with_code(&self, code: &str, state: &str) -> Result<User, AppError> {
        verify_oauth_state(&self.settings, state)?;

        let token_response = self.exchange_code_for_token(code).await?;
        let google_user = self.fetch_user_info(&token_response.access_token).await?;

        self.resolve_user(google_user).await
    }

    /// 검증된 Google 신원 단언을 로컬 사용자 레코드로 해석합니다.
    ///
    /// 결과를 값으로 반환하는 일반 함수입니다. 성공 시 사용자,
    /// 충돌 시 `ConflictError`, 저장소 오류 시 `DatabaseError`.
    pub async fn resolve_user(&self, google_user: GoogleUserInfo) -> Result<User, AppError> {
        // 1차 키: 외부 식별자
        if let Some(user) = self.user_repo.find_by_google_id(&google_user.id).await? {
            log::info!("Google 사용자 로그인: {}", user.email);
            return Ok(user);
        }

        let email = normalize_email(&google_user.email);

        match self.user_repo.find_by_email(&email).await? {
            Some(existing) => match classify_email_match(&existing) {
                EmailMatch::Linkable => {
                    let id = existing
                        .id_string()
                        .ok_or_else(|| AppError::InternalError("User has no id".to_string()))?;

                    // CAS 연동: 동시에 다른 연동이 선행되면 필터가 빗나가고 충돌 처리
                    let linked = self
                        .user_repo
                        .link_google_identity(&id, &google_user.id)
                        .await?
                        .ok_or_else(|| {
                            AppError::ConflictError(PROVIDER_CONFLICT_MESSAGE.to_string())
                        })?;

                    log::info!("Google 신원 연동 완료: {}", linked.email);
                    Ok(linked)
                }
                EmailMatch::Conflict => {
                    log::warn!("프로바이더 충돌: 이메일 {}은 이미 다른 경로로 등록됨", email);
                    Err(AppError::ConflictError(PROVIDER_CONFLICT_MESSAGE.to_string()))
                }
            },
            None => {
                log::info!("새 Google 사용자 등록: {}", email);
                let user = User::new_google(
                    google_user.name.trim().to_string(),
                    email,
                    google_user.id,
                    clean_optional_string(google_user.picture),
                );
                self.user_repo.create(user).await
            }
        }
    }

    /// Authorization Code를 Google 액세스 토큰으로 교환합니다.
    async fn exchange_code_for_token(&self, code: &str) -> Result<GoogleTokenResponse, AppError> {
        let params = [
            ("code", code),
            ("client_id", &self.settings.client_id),
            ("client_secret", &self.settings.client_secret),
            ("redirect_uri", &self.settings.redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.settings.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Google token request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google token exchange failed: {}",
                error_text
            )));
        }

        response.json::<GoogleTokenResponse>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse Google token response: {}", e))
        })
    }

    /// Google 액세스 토큰으로 사용자 정보를 조회합니다.
    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, AppError> {
        let response = self
            .http
            .get(&self.settings.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Google userinfo request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google userinfo fetch failed: {}",
                error_text
            )));
        }

        response.json::<GoogleUserInfo>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse Google userinfo: {}", e))
        })
    }
}

/// 이메일 일치 시 계정 처리 판정
#[derive(Debug, PartialEq)]
enum EmailMatch {
    /// google 프로바이더이면서 외부 식별자가 아직 없는 레코드: 연동 대상
    Linkable,
    /// 그 외 전부: 프로바이더 충돌. 자동 병합하지 않습니다.
    Conflict,
}

fn classify_email_match(user: &User) -> EmailMatch {
    match (&user.auth_provider, &user.google_id) {
        (AuthProvider::Google, None) => EmailMatch::Linkable,
        _ => EmailMatch::Conflict,
    }
}

/// Authorization URL 구성
fn build_authorize_url(settings: &GoogleOAuthSettings, state: &str) -> String {
    let params = [
        ("client_id", settings.client_id.as_str()),
        ("redirect_uri", settings.redirect_uri.as_str()),
        ("scope", "openid email profile"),
        ("response_type", "code"),
        ("access_type", "offline"),
        ("prompt", "select_account"),
        ("state", state),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", settings.auth_uri, query_string)
}

/// CSRF 방지용 OAuth state 생성
///
/// `timestamp:nonce:signature` 형태를 base64url로 감싼 자체 검증형 값입니다.
fn generate_oauth_state(settings: &GoogleOAuthSettings) -> String {
    let timestamp = Utc::now().timestamp();
    let nonce = Uuid::new_v4().simple().to_string();
    let signature = state_signature(timestamp, &nonce, &settings.state_secret);

    URL_SAFE_NO_PAD.encode(format!("{}:{}:{}", timestamp, nonce, signature))
}

/// OAuth state 검증
///
/// 서명 불일치는 위조로, 시간 초과는 만료로 구분하여 거부합니다.
/// 어느 쪽이든 콜백 핸들러에서는 불투명한 실패 리다이렉트로 수렴합니다.
fn verify_oauth_state(settings: &GoogleOAuthSettings, state: &str) -> Result<(), AppError> {
    let invalid = || AppError::AuthenticationError("Invalid OAuth state".to_string());

    let raw = URL_SAFE_NO_PAD.decode(state).map_err(|_| invalid())?;
    let raw = String::from_utf8(raw).map_err(|_| invalid())?;

    let mut parts = raw.splitn(3, ':');
    let timestamp: i64 = parts
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(invalid)?;
    let nonce = parts.next().ok_or_else(invalid)?;
    let signature = parts.next().ok_or_else(invalid)?;

    let expected = state_signature(timestamp, nonce, &settings.state_secret);
    if signature != expected {
        return Err(invalid());
    }

    let age_seconds = Utc::now().timestamp() - timestamp;
    if age_seconds < 0 || age_seconds > settings.state_timeout_minutes * 60 {
        return Err(AppError::AuthenticationError(
            "OAuth state expired".to_string(),
        ));
    }

    Ok(())
}

/// state 서명 계산: sha256("{timestamp}:{nonce}:{secret}")의 base64url
fn state_signature(timestamp: i64, nonce: &str, secret: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}:{}", timestamp, nonce, secret).as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GoogleOAuthSettings {
        GoogleOAuthSettings {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://localhost:8080/api/auth/google/callback".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_uri: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
            state_secret: "state-secret".to_string(),
            state_timeout_minutes: 10,
        }
    }

    #[test]
    fn test_oauth_state_roundtrip() {
        let settings = settings();
        let state = generate_oauth_state(&settings);

        assert!(verify_oauth_state(&settings, &state).is_ok());
    }

    #[test]
    fn test_tampered_state_is_rejected() {
        let settings = settings();
        let state = generate_oauth_state(&settings);

        let mut tampered = state.clone();
        tampered.push('x');
        assert!(verify_oauth_state(&settings, &tampered).is_err());

        assert!(verify_oauth_state(&settings, "").is_err());
        assert!(verify_oauth_state(&settings, "not-base64!!!").is_err());
    }

    #[test]
    fn test_state_signed_with_other_secret_is_rejected() {
        let settings = settings();
        let mut other = settings.clone();
        other.state_secret = "different-secret".to_string();

        let state = generate_oauth_state(&other);
        assert!(verify_oauth_state(&settings, &state).is_err());
    }

    #[test]
    fn test_stale_state_is_rejected() {
        let settings = settings();

        // 유효 시간(10분)을 넘긴 과거 타임스탬프로 올바르게 서명된 state
        let old_timestamp = Utc::now().timestamp() - 11 * 60;
        let nonce = "abc123";
        let signature = state_signature(old_timestamp, nonce, &settings.state_secret);
        let stale =
            URL_SAFE_NO_PAD.encode(format!("{}:{}:{}", old_timestamp, nonce, signature));

        let err = verify_oauth_state(&settings, &stale).unwrap_err();
        match err {
            AppError::AuthenticationError(msg) => assert!(msg.contains("expired")),
            other => panic!("Expected AuthenticationError, got {:?}", other),
        }
    }

    #[test]
    fn test_authorize_url_contains_required_params() {
        let settings = settings();
        let state = generate_oauth_state(&settings);
        let url = build_authorize_url(&settings, &state);

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains(&format!("state={}", state)));
        // redirect_uri는 인코딩되어야 함
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080"));
    }

    #[test]
    fn test_local_account_email_match_is_conflict() {
        let user = User::new_local(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );

        assert_eq!(classify_email_match(&user), EmailMatch::Conflict);
    }

    #[test]
    fn test_google_account_without_id_is_linkable() {
        let mut user = User::new_google(
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "sub-1".to_string(),
            None,
        );
        user.google_id = None; // 레거시 레코드: provider는 google인데 식별자 없음

        assert_eq!(classify_email_match(&user), EmailMatch::Linkable);
    }

    #[test]
    fn test_google_account_with_other_id_is_conflict() {
        let user = User::new_google(
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "someone-else".to_string(),
            None,
        );

        assert_eq!(classify_email_match(&user), EmailMatch::Conflict);
    }
}
