//! 인증된 사용자 컨텍스트
//!
//! 세션 미들웨어가 토큰 검증과 사용자 조회를 마친 뒤 요청 컨텍스트에
//! 첨부하는 타입입니다. 임의 필드를 요청 객체에 덧붙이는 대신,
//! 요청당 한 번 생성되는 명시적 타입으로 다운스트림 핸들러에 전달됩니다.

use std::future::{Ready, ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 검증된 토큰과 살아있는 사용자 레코드로부터 구성된 요청 컨텍스트 신원
///
/// 자격 증명 관련 필드(비밀번호 해시, 토큰 버전)는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,

    /// 표시 이름
    pub name: String,

    /// 사용자 이메일
    pub email: String,

    /// 인증 프로바이더
    pub auth_provider: AuthProvider,
}

/// ActixWeb FromRequest trait 구현
///
/// 세션 미들웨어를 통과한 요청에서만 추출 가능하며,
/// 미들웨어 없이 사용되면 401을 반환합니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "Authentication required",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "507f1f77bcf86cd799439011".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            auth_provider: AuthProvider::Local,
        }
    }

    #[actix_web::test]
    async fn test_extracts_identity_from_request_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(sample_user());

        let extracted = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(extracted.user_id, "507f1f77bcf86cd799439011");
        assert_eq!(extracted.email, "alice@example.com");
    }

    #[actix_web::test]
    async fn test_missing_identity_is_rejected() {
        let req = TestRequest::default().to_http_request();

        let extracted = AuthenticatedUser::extract(&req).await;
        assert!(extracted.is_err());
    }
}
