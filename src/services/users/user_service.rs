//! # 사용자 관리 서비스 구현
//!
//! 로컬 인증 플로우의 핵심 비즈니스 로직을 구현합니다.
//! 가입 입력 검증, 중복 검사, 비밀번호 해싱, 자격 증명 검증,
//! 리프레시 토큰 일괄 무효화를 담당합니다.
//!
//! ## 보안 설계 원칙
//!
//! - **평문 비밀번호 비영속**: 비밀번호는 해싱 직후 버려지며
//!   어떤 로그·응답·토큰에도 실리지 않습니다.
//! - **계정 열거 방지**: 로그인 실패는 이메일 미존재든 비밀번호 불일치든
//!   동일한 "Invalid credentials" 메시지로만 응답합니다.
//! - **정규화 일원화**: 이메일은 저장·비교 전에 항상 trim + 소문자로
//!   정규화됩니다. 가입과 로그인의 조회 기준이 달라지는 일은 없습니다.

use std::sync::Arc;

use validator::ValidateEmail;

use crate::core::errors::AppError;
use crate::domain::dto::users::request::RegisterRequest;
use crate::domain::entities::users::user::User;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::password_service::PasswordService;
use crate::utils::string_utils::{is_valid_string, normalize_email};

/// 로그인 실패 시의 단일화된 메시지. 이메일 존재 여부를 절대 누설하지 않습니다.
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// 사용자 관리 서비스
///
/// 시작 시점에 리포지토리·해셔와 함께 한 번 생성되어 주입됩니다.
pub struct UserService {
    user_repo: Arc<UserRepository>,
    passwords: Arc<PasswordService>,
}

impl UserService {
    pub fn new(user_repo: Arc<UserRepository>, passwords: Arc<PasswordService>) -> Self {
        Self {
            user_repo,
            passwords,
        }
    }

    /// 로컬 계정 가입
    ///
    /// # 처리 단계
    ///
    /// 1. 필수 필드 존재 검증 (누락 필드 목록을 에러에 포함)
    /// 2. 이메일 형식 / 비밀번호 길이(6자 이상) 검증
    /// 3. 정규화된 이메일로 중복 검사 (대소문자 무관)
    /// 4. 비밀번호 해싱 — 실패 시 사용자는 생성되지 않습니다
    /// 5. 사용자 영속화 — 유니크 인덱스가 동시 가입 경쟁의 최종 방어선
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 필드 누락, 이메일 형식, 비밀번호 길이
    /// * `AppError::ConflictError` - 이메일 중복 (사전 검사 또는 인덱스 충돌)
    /// * `AppError::InternalError` - 해싱 실패
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let valid = validate_registration(request)?;

        // 사전 중복 검사 (UX용; 권위는 유니크 인덱스)
        if self.user_repo.find_by_email(&valid.email).await?.is_some() {
            return Err(AppError::ConflictError(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = self.passwords.hash(&valid.password)?;

        let user = User::new_local(valid.name, valid.email, password_hash);
        let created = self.user_repo.create(user).await?;

        log::info!("새 로컬 사용자 가입: {}", created.email);
        Ok(created)
    }

    /// 이메일/비밀번호 자격 증명 검증
    ///
    /// 실패 사유(미존재 이메일, OAuth 전용 계정, 비밀번호 불일치)와 무관하게
    /// 항상 동일한 메시지의 `AuthenticationError`를 반환합니다.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        // OAuth 전용 계정에는 검증할 비밀번호 자격 증명이 없습니다
        let password_hash = match &user.password_hash {
            Some(hash) if user.can_authenticate_with_password() => hash,
            _ => return Err(invalid_credentials()),
        };

        if !self.passwords.verify(password, password_hash)? {
            return Err(invalid_credentials());
        }

        Ok(user)
    }

    /// ID로 사용자 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_id(id).await
    }

    /// 해당 사용자의 모든 리프레시 토큰 무효화 (전역 로그아웃)
    ///
    /// `token_version`을 원자적으로 증가시킵니다. 이전 버전으로 발급된
    /// 리프레시 토큰은 이후 재발급 시도에서 전부 거부됩니다.
    pub async fn revoke_refresh_tokens(&self, id: &str) -> Result<User, AppError> {
        let user = self
            .user_repo
            .bump_token_version(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        log::info!(
            "리프레시 토큰 전체 무효화: {} (token_version={})",
            user.email,
            user.token_version
        );
        Ok(user)
    }
}

fn invalid_credentials() -> AppError {
    AppError::AuthenticationError(INVALID_CREDENTIALS_MESSAGE.to_string())
}

/// 검증을 통과한 가입 입력
#[derive(Debug)]
struct ValidatedRegistration {
    name: String,
    email: String,
    password: String,
}

/// 가입 입력 검증
///
/// 누락 필드는 한 번에 모아 이름을 나열해 반환합니다.
/// 이메일은 정규화된 형태로, 이름은 trim된 형태로 반환됩니다.
fn validate_registration(request: RegisterRequest) -> Result<ValidatedRegistration, AppError> {
    let name = request.name.as_deref().unwrap_or_default();
    let email = request.email.as_deref().unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();

    let mut missing = Vec::new();
    if !is_valid_string(name) {
        missing.push("name");
    }
    if !is_valid_string(email) {
        missing.push("email");
    }
    if password.is_empty() {
        missing.push("password");
    }

    if !missing.is_empty() {
        return Err(AppError::ValidationError(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let email = normalize_email(email);
    if !email.validate_email() {
        return Err(AppError::ValidationError(
            "Please provide a valid email address".to_string(),
        ));
    }

    if password.len() < 6 {
        return Err(AppError::ValidationError(
            "Password must be at least 6 characters long".to_string(),
        ));
    }

    Ok(ValidatedRegistration {
        name: name.trim().to_string(),
        email,
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>, password: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            name: name.map(String::from),
            email: email.map(String::from),
            password: password.map(String::from),
        }
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::ValidationError(msg) => msg,
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        let valid =
            validate_registration(request(Some("  Alice "), Some("A@B.com"), Some("secret1")))
                .unwrap();

        assert_eq!(valid.name, "Alice");
        assert_eq!(valid.email, "a@b.com"); // 정규화
        assert_eq!(valid.password, "secret1");
    }

    #[test]
    fn test_missing_fields_are_all_listed() {
        let err = validate_registration(request(None, None, None)).unwrap_err();
        let msg = validation_message(err);

        assert!(msg.contains("name"));
        assert!(msg.contains("email"));
        assert!(msg.contains("password"));
    }

    #[test]
    fn test_single_missing_field_is_named() {
        let err =
            validate_registration(request(Some("Alice"), Some("a@b.com"), None)).unwrap_err();
        let msg = validation_message(err);

        assert!(msg.contains("password"));
        assert!(!msg.contains("name"));
        assert!(!msg.contains("email,"));
    }

    #[test]
    fn test_whitespace_only_name_counts_as_missing() {
        let err =
            validate_registration(request(Some("   "), Some("a@b.com"), Some("secret1")))
                .unwrap_err();

        assert!(validation_message(err).contains("name"));
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let err = validate_registration(request(Some("Alice"), Some("not-an-email"), Some("secret1")))
            .unwrap_err();

        assert!(validation_message(err).contains("valid email"));
    }

    #[test]
    fn test_short_password_is_rejected() {
        let err = validate_registration(request(Some("Alice"), Some("a@b.com"), Some("12345")))
            .unwrap_err();

        assert!(validation_message(err).contains("at least 6 characters"));
    }

    #[test]
    fn test_six_character_password_is_accepted() {
        assert!(validate_registration(request(Some("Alice"), Some("a@b.com"), Some("123456"))).is_ok());
    }

    #[test]
    fn test_invalid_credentials_message_is_uniform() {
        // 어떤 실패 경로든 같은 메시지를 써야 합니다
        match invalid_credentials() {
            AppError::AuthenticationError(msg) => assert_eq!(msg, "Invalid credentials"),
            other => panic!("Expected AuthenticationError, got {:?}", other),
        }
    }
}
