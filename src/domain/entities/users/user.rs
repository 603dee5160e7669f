//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증과 Google OAuth 인증을 모두 지원하는 통합된 사용자 모델을 제공합니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 사용자 엔티티
///
/// 시스템에서 영속화되는 유일한 집합 루트입니다.
/// 이메일은 정규화(trim + 소문자)된 형태로만 저장되며 시스템 전체에서 유일합니다.
///
/// ## 불변 조건
///
/// - `email`은 대소문자 구분 없이 유일합니다 (유니크 인덱스로 강제).
/// - `password_hash`는 평문이 아닌 bcrypt 해시만 담습니다. OAuth 전용 계정은 None.
/// - `google_id`는 provider가 google일 때만 존재하며, 연동 로그인 시
///   이메일보다 우선하는 조회 키입니다.
/// - `token_version`은 단조 증가만 합니다. 증가 시 기존 리프레시 토큰이
///   전부 무효화됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 표시 이름
    pub name: String,
    /// 사용자 이메일 (정규화 저장, unique)
    pub email: String,
    /// 해시된 비밀번호 (OAuth 전용 계정의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 인증 프로바이더
    pub auth_provider: AuthProvider,
    /// Google이 발급한 외부 식별자 (로컬 계정의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    /// 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// 리프레시 토큰 일괄 무효화용 카운터
    pub token_version: i64,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/비밀번호)
    ///
    /// `email`은 호출 전에 정규화되어 있어야 하고, `password_hash`는
    /// 이미 해싱된 값이어야 합니다.
    pub fn new_local(name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password_hash: Some(password_hash),
            auth_provider: AuthProvider::Local,
            google_id: None,
            avatar: None,
            token_version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 Google OAuth 사용자 생성
    ///
    /// 비밀번호 자격 증명 없이 생성되며, 이후 로컬 로그인은 불가능합니다.
    pub fn new_google(
        name: String,
        email: String,
        google_id: String,
        avatar: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password_hash: None,
            auth_provider: AuthProvider::Google,
            google_id: Some(google_id),
            avatar,
            token_version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 로컬 인증 사용자인지 확인
    pub fn is_local_auth(&self) -> bool {
        matches!(self.auth_provider, AuthProvider::Local)
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.is_local_auth() && self.password_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_user() {
        let user = User::new_local(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );

        assert_eq!(user.auth_provider, AuthProvider::Local);
        assert!(user.password_hash.is_some());
        assert!(user.google_id.is_none());
        assert_eq!(user.token_version, 0);
        assert!(user.id.is_none());
        assert!(user.can_authenticate_with_password());
    }

    #[test]
    fn test_new_google_user_has_no_password_credential() {
        let user = User::new_google(
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "google-sub-123".to_string(),
            Some("https://lh3.googleusercontent.com/photo.jpg".to_string()),
        );

        assert_eq!(user.auth_provider, AuthProvider::Google);
        assert!(user.password_hash.is_none());
        assert_eq!(user.google_id.as_deref(), Some("google-sub-123"));
        assert_eq!(user.token_version, 0);
        assert!(!user.can_authenticate_with_password());
    }

    #[test]
    fn test_id_string() {
        let mut user = User::new_local(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        assert!(user.id_string().is_none());

        let oid = ObjectId::new();
        user.id = Some(oid);
        assert_eq!(user.id_string(), Some(oid.to_hex()));
    }
}
