//! 문자열 처리 유틸리티
//!
//! 입력값 정리와 필수값 검증에 사용되는 공통 함수들입니다.

use crate::core::errors::AppError;

/// 필수 문자열 필드를 검증하고 trim된 값을 반환합니다.
///
/// 비어 있거나 공백뿐인 경우 필드 이름을 포함한 `ValidationError`를 반환합니다.
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!(
            "{} is required",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열을 정리합니다. 공백뿐인 값은 None으로 정규화합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 이메일 주소를 저장/비교용 형태로 정규화합니다 (trim + 소문자).
///
/// 모든 이메일 조회와 저장은 이 함수를 거친 값으로만 수행되어야
/// `User@x.com`과 `user@x.com`이 동일 계정으로 취급됩니다.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 값이 비어 있지 않은 유효한 문자열인지 확인합니다.
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        // 성공 케이스
        assert_eq!(validate_required_string("Hello", "name").unwrap(), "Hello");
        assert_eq!(
            validate_required_string("  World  ", "name").unwrap(),
            "World"
        );

        // 실패 케이스
        assert!(validate_required_string("", "name").is_err());
        assert!(validate_required_string("   ", "name").is_err());
        assert!(validate_required_string("\t\n", "name").is_err());
    }

    #[test]
    fn test_validate_required_string_names_the_field() {
        let err = validate_required_string("", "email").unwrap_err();
        if let AppError::ValidationError(msg) = err {
            assert!(msg.contains("email"));
        } else {
            panic!("Expected ValidationError");
        }
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(
            clean_optional_string(Some("Hello".to_string())),
            Some("Hello".to_string())
        );
        assert_eq!(
            clean_optional_string(Some("  World  ".to_string())),
            Some("World".to_string())
        );
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("User@Example.COM"), "user@example.com");
        assert_eq!(normalize_email("  a@b.com  "), "a@b.com");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_is_valid_string() {
        assert!(is_valid_string("Hello"));
        assert!(is_valid_string("  World  "));
        assert!(!is_valid_string(""));
        assert!(!is_valid_string("   "));
    }
}
