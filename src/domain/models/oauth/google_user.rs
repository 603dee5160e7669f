//! Google 사용자 정보 모델
//!
//! Google userinfo 엔드포인트가 반환하는, 검증이 끝난 신원 단언입니다.
//! 연동 인증 플로우는 이 정규화된 형태만을 입력으로 받습니다.

use serde::Deserialize;

/// Google이 단언한 사용자 신원
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Google이 발급한 불투명 식별자 (연동 조회의 1차 키)
    pub id: String,

    /// 사용자 이메일 (정규화 전 원본)
    pub email: String,

    /// 표시 이름
    pub name: String,

    /// 프로필 이미지 URL
    #[serde(default)]
    pub picture: Option<String>,

    /// Google 측 이메일 검증 여부
    #[serde(default)]
    pub verified_email: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_minimal_payload() {
        let json = r#"{"id":"108","email":"u@gmail.com","name":"U"}"#;
        let info: GoogleUserInfo = serde_json::from_str(json).unwrap();

        assert_eq!(info.id, "108");
        assert!(info.picture.is_none());
        assert!(info.verified_email.is_none());
    }

    #[test]
    fn test_deserializes_full_payload() {
        let json = r#"{
            "id": "108",
            "email": "u@gmail.com",
            "name": "U",
            "picture": "https://lh3.googleusercontent.com/p.jpg",
            "verified_email": true
        }"#;
        let info: GoogleUserInfo = serde_json::from_str(json).unwrap();

        assert_eq!(info.verified_email, Some(true));
        assert!(info.picture.is_some());
    }
}
