//! AuthMiddleware 인증 로직의 핵심적인 기능

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::{Error, HttpMessage, ResponseError, web};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::TokenService;
use crate::services::users::UserService;

/// 실제 인증 로직을 수행하는 서비스
///
/// 상태 전이는 비인증 → 인증 단 한 단계뿐이며, 어떤 실패든 재시도나
/// 대체 경로 없이 즉시 요청 체인을 끊습니다.
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate_request(&req).await {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);

                    // 신원을 Request Extensions에 저장 (자격 증명 정보는 제외)
                    req.extensions_mut().insert(user);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::warn!("인증 실패: {}", err);

                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    Ok(ServiceResponse::new(req, response).map_into_right_body())
                }
            }
        })
    }
}

/// 요청에서 JWT 토큰을 추출·검증하고 살아있는 사용자로 해석합니다.
///
/// # 실패 경로 (모두 401)
///
/// - Authorization 헤더 누락/형식 오류 → "Missing token"
/// - 만료된 토큰 → "Token expired" (클라이언트는 리프레시 시도)
/// - 그 외 검증 실패 → "Invalid token"
/// - 발급 후 삭제된 사용자 → "User not found"
async fn authenticate_request(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let token_service = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::InternalError("TokenService not configured".to_string()))?;

    // Authorization 헤더 추출
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Missing token".to_string()))?;

    // Bearer 토큰 추출 및 검증
    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_access_token(token)?;

    // 클레임의 사용자 ID를 살아있는 레코드로 해석
    let user_service = req
        .app_data::<web::Data<UserService>>()
        .ok_or_else(|| AppError::InternalError("UserService not configured".to_string()))?;

    let user = user_service
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::AuthenticationError("User not found".to_string()))?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        name: user.name,
        email: user.email,
        auth_provider: user.auth_provider,
    })
}
