//! 사용자 응답 DTO
//!
//! 엔티티에서 민감한 필드(비밀번호 해시, 토큰 버전, 외부 식별자)를 제거한
//! 클라이언트 전달용 프로필입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::users::user::User;

/// 정제된 사용자 프로필 응답
///
/// 자격 증명 관련 필드는 어떤 경우에도 포함되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub provider: AuthProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            name,
            email,
            auth_provider,
            avatar,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            email,
            provider: auth_provider,
            avatar,
            created_at: created_at.to_chrono(),
            updated_at: updated_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_excludes_credentials() {
        let user = User::new_local(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));
        assert!(!json.contains("token_version"));
        assert!(json.contains("\"email\":\"alice@example.com\""));
        assert!(json.contains("\"provider\":\"local\""));
    }

    #[test]
    fn test_user_response_uses_camel_case_timestamps() {
        let user = User::new_local(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(json.contains("createdAt"));
        assert!(json.contains("updatedAt"));
    }
}
