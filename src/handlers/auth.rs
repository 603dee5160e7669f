//! Authentication HTTP Handlers
//!
//! 사용자 인증과 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 로컬 인증과 Google OAuth 2.0 인증을 모두 지원하며,
//! JWT 토큰 기반의 상태 없는 인증을 구현합니다.
//!
//! # 토큰 전달 규약
//!
//! - **액세스 토큰**: 응답 본문(`accessToken`)으로 반환, 이후 요청의
//!   `Authorization: Bearer` 헤더에 실립니다.
//! - **리프레시 토큰**: `jid` HttpOnly 쿠키로만 전달합니다
//!   (SameSite=Strict, 운영 환경에서 Secure, 7일).
//! - **OAuth 콜백**: 크로스 오리진 리다이렉트로 끝나는 플로우이므로
//!   쿠키 대신 프론트엔드 리다이렉트 URL 파라미터로 토큰을 전달합니다.

use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde_json::json;
use validator::Validate;

use crate::config::{ClientConfig, Environment};
use crate::core::errors::AppError;
use crate::domain::models::token::TokenPair;
use crate::domain::{
    AuthenticatedUser, LoginRequest, OAuthCallbackQuery, RegisterRequest, UserResponse,
};
use crate::services::auth::{GoogleAuthService, TokenService};
use crate::services::users::UserService;

/// 리프레시 토큰 쿠키 이름
const REFRESH_COOKIE_NAME: &str = "jid";

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/auth/register`
///
/// 성공 시 201과 함께 정제된 사용자 프로필과 액세스 토큰을 반환하고
/// 리프레시 쿠키를 설정합니다. 비밀번호 해시는 어떤 경우에도 응답에
/// 포함되지 않습니다.
#[post("/register")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    let user = user_service.register(payload.into_inner()).await?;

    let token_pair = token_service.generate_token_pair(&user)?;

    Ok(HttpResponse::Created()
        .cookie(refresh_cookie(
            &token_pair.refresh_token,
            token_service.refresh_ttl_days(),
        ))
        .json(json!({
            "user": UserResponse::from(user),
            "accessToken": token_pair.access_token,
        })))
}

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /api/auth/login`
///
/// 실패 시 이메일 존재 여부와 무관하게 동일한 401 응답만 반환합니다.
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = user_service
        .verify_credentials(&payload.email, &payload.password)
        .await?;

    let token_pair = token_service.generate_token_pair(&user)?;

    log::info!("로컬 로그인 성공 - 사용자: {}", user.email);

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(
            &token_pair.refresh_token,
            token_service.refresh_ttl_days(),
        ))
        .json(json!({ "accessToken": token_pair.access_token })))
}

/// 로그아웃 핸들러
///
/// 리프레시 쿠키를 제거합니다. 항상 성공하며 멱등합니다.
///
/// # Endpoint
/// `POST /api/auth/logout`
#[post("/logout")]
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(clear_refresh_cookie())
        .json(json!({ "message": "Logged out" }))
}

/// 액세스 토큰 재발급 핸들러
///
/// `jid` 쿠키의 리프레시 토큰을 검증하고, 클레임의 `token_version`이
/// 사용자의 현재 값과 일치할 때만 새 액세스 토큰을 발급합니다.
/// 회전 정책은 없습니다 — 쿠키는 그대로 유지됩니다.
///
/// # Endpoint
/// `POST /api/auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    let cookie = req
        .cookie(REFRESH_COOKIE_NAME)
        .ok_or_else(|| AppError::AuthenticationError("Missing refresh token".to_string()))?;

    let claims = token_service.verify_refresh_token(cookie.value())?;

    let user = user_service
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::AuthenticationError("Invalid refresh token".to_string()))?;

    // 발급 이후 전역 로그아웃이 있었다면 버전이 어긋납니다
    if claims.token_version != user.token_version {
        log::warn!("무효화된 리프레시 토큰 사용 시도: 사용자 ID {}", claims.sub);
        return Err(AppError::AuthenticationError(
            "Invalid refresh token".to_string(),
        ));
    }

    let access_token = token_service.generate_access_token(&user)?;

    Ok(HttpResponse::Ok().json(json!({ "accessToken": access_token })))
}

/// 현재 인증된 사용자 정보 조회 핸들러
///
/// 세션 미들웨어를 통과한 요청의 신원으로 최신 사용자 정보를 조회합니다.
///
/// # Endpoint
/// `GET /api/auth/me`
#[get("/me")]
pub async fn get_current_user(
    identity: AuthenticatedUser,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let user = user_service
        .find_by_id(&identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// 리프레시 토큰 전체 무효화 핸들러 (전역 로그아웃)
///
/// `token_version`을 증가시켜 지금까지 발급된 모든 리프레시 토큰을
/// 무효화하고, 현재 세션의 리프레시 쿠키도 제거합니다.
///
/// # Endpoint
/// `POST /api/auth/revoke`
#[post("/revoke")]
pub async fn revoke_all_tokens(
    identity: AuthenticatedUser,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    user_service
        .revoke_refresh_tokens(&identity.user_id)
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(clear_refresh_cookie())
        .json(json!({ "message": "All sessions revoked" })))
}

/// Google OAuth 시작 핸들러
///
/// 서명된 state를 포함한 Google 동의 화면 URL로 리다이렉트합니다.
///
/// # Endpoint
/// `GET /api/auth/google`
#[get("/google")]
pub async fn google_login(
    google_service: web::Data<GoogleAuthService>,
) -> Result<HttpResponse, AppError> {
    let url = google_service.authorize_url()?;

    Ok(HttpResponse::Found()
        .append_header(("Location", url))
        .finish())
}

/// Google OAuth 콜백 핸들러
///
/// 플로우가 리다이렉트 도중이므로 JSON 에러를 반환하지 않습니다.
/// 성공이든 실패든 항상 프론트엔드로 리다이렉트하며, 실패 상세는
/// 서버 로그에만 남기고 클라이언트에는 불투명한 에러 코드만 전달합니다.
///
/// # Endpoint
/// `GET /api/auth/google/callback?code={code}&state={state}`
#[get("/google/callback")]
pub async fn google_callback(
    query: web::Query<OAuthCallbackQuery>,
    google_service: web::Data<GoogleAuthService>,
    token_service: web::Data<TokenService>,
) -> HttpResponse {
    let origin = ClientConfig::origin();

    match handle_google_callback(query.into_inner(), &google_service, &token_service).await {
        Ok(token_pair) => {
            let target = format!(
                "{}/auth/callback?token={}&refreshToken={}",
                origin,
                urlencoding::encode(&token_pair.access_token),
                urlencoding::encode(&token_pair.refresh_token),
            );

            HttpResponse::Found()
                .append_header(("Location", target))
                .finish()
        }
        Err(err) => {
            log::warn!("Google OAuth 콜백 실패: {}", err);

            let target = format!("{}/login?error=authentication_failed", origin);
            HttpResponse::Found()
                .append_header(("Location", target))
                .finish()
        }
    }
}

/// 콜백 처리 본체. 실패는 전부 호출자에서 리다이렉트로 수렴됩니다.
async fn handle_google_callback(
    query: OAuthCallbackQuery,
    google_service: &GoogleAuthService,
    token_service: &TokenService,
) -> Result<TokenPair, AppError> {
    // 사용자가 동의를 거부했거나 프로바이더 측 에러
    if let Some(error) = &query.error {
        let detail = query.error_description.as_deref().unwrap_or("unknown");
        return Err(AppError::AuthenticationError(format!(
            "Provider returned error: {} ({})",
            error, detail
        )));
    }

    let code = query
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("Missing authorization code".to_string()))?;
    let state = query.state.as_deref().unwrap_or_default();

    let user = google_service.authenticate_with_code(code, state).await?;

    token_service.generate_token_pair(&user)
}

/// 리프레시 토큰 쿠키 생성
///
/// HttpOnly + SameSite=Strict + (운영 환경에서) Secure.
/// max-age는 발급 서비스에 설정된 리프레시 토큰 수명과 동일합니다.
fn refresh_cookie(token: &str, ttl_days: i64) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE_NAME, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(Environment::current().is_production())
        .max_age(time::Duration::days(ttl_days))
        .finish()
}

/// 리프레시 토큰 쿠키 제거 (동일 속성 + max-age 0)
fn clear_refresh_cookie() -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE_NAME, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(Environment::current().is_production())
        .max_age(time::Duration::ZERO)
        .finish()
}
