//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 인증 시스템을 제공합니다.
//! 액세스 토큰과 리프레시 토큰의 생성과 검증을 담당합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::{AccessClaims, RefreshClaims, TokenPair};

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 JWT 토큰을 생성하고 검증합니다.
/// 액세스 토큰(기본 15분)과 리프레시 토큰(기본 7일)은 서로 다른 비밀키로
/// 서명되므로, 한쪽 토큰을 다른 쪽 검증기에 제시하면 항상 실패합니다.
///
/// 시작 시점에 설정값으로 한 번 생성되어 라우팅 계층에 주입됩니다.
pub struct TokenService {
    access_secret: String,
    refresh_secret: String,
    access_ttl_minutes: i64,
    refresh_ttl_days: i64,
}

impl TokenService {
    pub fn new(
        access_secret: String,
        refresh_secret: String,
        access_ttl_minutes: i64,
        refresh_ttl_days: i64,
    ) -> Self {
        Self {
            access_secret,
            refresh_secret,
            access_ttl_minutes,
            refresh_ttl_days,
        }
    }

    /// 환경 설정으로 서비스를 생성합니다.
    ///
    /// 비밀키 환경변수는 시작 검증을 통과한 상태여야 합니다.
    pub fn from_env() -> Self {
        Self::new(
            JwtConfig::access_secret(),
            JwtConfig::refresh_secret(),
            JwtConfig::access_expiration_minutes(),
            JwtConfig::refresh_expiration_days(),
        )
    }

    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `user` - 토큰을 발급받을 사용자 (ID가 할당되어 있어야 함)
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 사용자 ID 없음
    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.access_ttl_minutes);

        let claims = AccessClaims {
            sub: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("User has no id".to_string()))?,
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.access_secret.as_ref()),
        )
        .map_err(|e| AppError::InternalError(format!("Failed to sign access token: {}", e)))
    }

    /// 사용자를 위한 리프레시 토큰 생성
    ///
    /// 발급 시점의 `token_version`을 클레임에 포함합니다. 재발급 시 현재
    /// 버전과 일치하지 않으면 토큰은 거부됩니다.
    ///
    /// # Security
    ///
    /// 리프레시 토큰은 HttpOnly 쿠키로만 전달하며 응답 본문에 싣지 않습니다.
    /// (OAuth 콜백의 리다이렉트 전달은 예외)
    pub fn generate_refresh_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::days(self.refresh_ttl_days);

        let claims = RefreshClaims {
            sub: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("User has no id".to_string()))?,
            token_version: user.token_version,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.refresh_secret.as_ref()),
        )
        .map_err(|e| AppError::InternalError(format!("Failed to sign refresh token: {}", e)))
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let access_token = self.generate_access_token(user)?;
        let refresh_token = self.generate_refresh_token(user)?;
        let expires_in = self.access_ttl_minutes * 60; // 초 단위로 변환

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in,
        })
    }

    /// 액세스 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError("Token expired")` - 만료된 토큰.
    ///   클라이언트는 리프레시를 시도해야 합니다.
    /// * `AppError::AuthenticationError("Invalid token")` - 서명 불일치,
    ///   형식 오류, 다른 비밀키로 서명된 토큰 등 그 외 모든 실패
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.access_secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(map_jwt_error)
    }

    /// 리프레시 토큰 검증 및 클레임 추출
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.refresh_secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(map_jwt_error)
    }

    /// 리프레시 쿠키 max-age에 쓰이는 토큰 수명(일)
    pub fn refresh_ttl_days(&self) -> i64 {
        self.refresh_ttl_days
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 `Bearer {token}` 형식에서 토큰만 추출합니다.
    /// 접두사가 없거나 형식이 다르면 누락으로 간주합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(AppError::AuthenticationError("Missing token".to_string())),
        }
    }
}

/// jsonwebtoken 에러를 AppError로 매핑합니다.
///
/// 만료만 별도 메시지로 구분하고, 나머지(서명 불일치, 구조 오류, 잘못된
/// 비밀키)는 전부 동일한 "Invalid token"으로 수렴시킵니다.
fn map_jwt_error(e: jsonwebtoken::errors::Error) -> AppError {
    match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::AuthenticationError("Token expired".to_string())
        }
        _ => AppError::AuthenticationError("Invalid token".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn service() -> TokenService {
        TokenService::new(
            "access-secret".to_string(),
            "refresh-secret".to_string(),
            15,
            7,
        )
    }

    fn user_with_id() -> User {
        let mut user = User::new_local(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );
        user.id = Some(ObjectId::new());
        user.token_version = 2;
        user
    }

    fn auth_error_message(err: AppError) -> String {
        match err {
            AppError::AuthenticationError(msg) => msg,
            other => panic!("Expected AuthenticationError, got {:?}", other),
        }
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = service();
        let user = user_with_id();

        let token = service.generate_access_token(&user).unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, user.id_string().unwrap());
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_carries_token_version() {
        let service = service();
        let user = user_with_id();

        let token = service.generate_refresh_token(&user).unwrap();
        let claims = service.verify_refresh_token(&token).unwrap();

        assert_eq!(claims.token_version, 2);
        assert_eq!(claims.sub, user.id_string().unwrap());
    }

    #[test]
    fn test_cross_secret_verification_fails_as_invalid() {
        let service = service();
        let user = user_with_id();

        // 액세스 토큰을 리프레시 검증기에, 리프레시 토큰을 액세스 검증기에
        let access = service.generate_access_token(&user).unwrap();
        let refresh = service.generate_refresh_token(&user).unwrap();

        let err = service.verify_refresh_token(&access).unwrap_err();
        assert_eq!(auth_error_message(err), "Invalid token");

        let err = service.verify_access_token(&refresh).unwrap_err();
        assert_eq!(auth_error_message(err), "Invalid token");
    }

    #[test]
    fn test_expired_token_is_distinguished_from_tampered() {
        let service = service();
        let user = user_with_id();

        // 만료된 토큰을 직접 서명 (기본 leeway 60초를 훨씬 넘긴 과거)
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id_string().unwrap(),
            email: user.email.clone(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("access-secret".as_ref()),
        )
        .unwrap();

        let err = service.verify_access_token(&expired).unwrap_err();
        assert_eq!(auth_error_message(err), "Token expired");

        // 변조된 토큰은 Invalid
        let valid = service.generate_access_token(&user).unwrap();
        let tampered = format!("{}x", valid);
        let err = service.verify_access_token(&tampered).unwrap_err();
        assert_eq!(auth_error_message(err), "Invalid token");
    }

    #[test]
    fn test_token_without_id_fails() {
        let service = service();
        let user = User::new_local(
            "NoId".to_string(),
            "noid@example.com".to_string(),
            "hash".to_string(),
        );

        assert!(service.generate_access_token(&user).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = service();

        assert_eq!(
            service.extract_bearer_token("Bearer abc.def.ghi").unwrap(),
            "abc.def.ghi"
        );

        assert!(service.extract_bearer_token("abc.def.ghi").is_err());
        assert!(service.extract_bearer_token("Basic dXNlcjpwdw==").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
        assert!(service.extract_bearer_token("").is_err());
    }

    #[test]
    fn test_token_pair_expires_in_seconds() {
        let service = service();
        let user = user_with_id();

        let pair = service.generate_token_pair(&user).unwrap();
        assert_eq!(pair.expires_in, 15 * 60);
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
    }
}
