//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 JWT 액세스 토큰을 검증하고
//! 인증된 사용자 신원을 요청 컨텍스트에 첨부합니다.
//!
//! 보호된 스코프에만 적용되며, 검증·조회에 필요한 서비스들은
//! 전역 상태가 아니라 `App`에 등록된 `web::Data`에서 가져옵니다.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
///
/// ```rust,ignore
/// cfg.service(
///     web::scope("/api/items")
///         .wrap(AuthMiddleware::required())
///         .service(handlers::items::get_items)
/// );
/// ```
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 필수 인증 미들웨어 생성
    ///
    /// 토큰이 없거나 유효하지 않은 요청은 핸들러에 도달하기 전에
    /// 401로 종료됩니다.
    pub fn required() -> Self {
        Self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
