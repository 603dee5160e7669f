//! 인증 요청 관련 DTO
//!
//! 인증을 요청하는 사용자들의 요청 정보를 매핑합니다.

use serde::Deserialize;
use validator::Validate;

/// 회원가입 요청 구조체
///
/// 세 필드 모두 필수지만, "어떤 필드가 누락되었는지"를 한 번에 알려주기 위해
/// 역직렬화 단계에서 거르지 않고 Option으로 받습니다.
/// 누락 목록 검증과 이메일 형식·비밀번호 길이 검증은 서비스 계층에서 수행됩니다
/// ([`crate::services::users::user_service`] 참조).
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// 로컬 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 사용자가 동의를 거부한 경우 `code` 없이 `error`만 전달되므로
/// 모든 필드를 Option으로 받고 핸들러에서 분기합니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_tolerates_missing_fields() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert!(req.name.is_none());
        assert_eq!(req.email.as_deref(), Some("a@b.com"));
        assert!(req.password.is_none());
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_password = LoginRequest {
            email: "a@b.com".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_oauth_callback_error_only() {
        let query: OAuthCallbackQuery =
            serde_json::from_str(r#"{"error":"access_denied"}"#).unwrap();
        assert!(query.code.is_none());
        assert_eq!(query.error.as_deref(), Some("access_denied"));
    }
}
