//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 인증 관련 라우트, 추적 항목 라우트, 헬스체크 엔드포인트를 포함합니다.
//!
//! # 인증 레벨
//!
//! ## 인증 불필요 (Public)
//! - `POST /api/auth/register`, `POST /api/auth/login`
//! - `POST /api/auth/logout`, `POST /api/auth/refresh` (쿠키 기반)
//! - `GET /api/auth/google`, `GET /api/auth/google/callback`
//! - `GET /api/health`
//!
//! ## 인증 필요 (Bearer 액세스 토큰)
//! - `GET /api/auth/me`, `POST /api/auth/revoke`
//! - `POST /api/items`, `GET /api/items`

use actix_web::web;
use serde_json::json;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::App;
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_item_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// 공개 라우트를 먼저 등록하고, 보호 라우트(`/me`, `/revoke`)는
/// 같은 스코프의 마지막에 빈 접두사 하위 스코프로 등록하여
/// 공개 경로가 먼저 매칭되도록 합니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            // 로컬 인증
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::logout)
            .service(handlers::auth::refresh)
            // Google OAuth
            .service(handlers::auth::google_login)
            .service(handlers::auth::google_callback)
            // 보호 라우트
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::auth::get_current_user)
                    .service(handlers::auth::revoke_all_tokens),
            ),
    );
}

/// 추적 항목 라우트를 설정합니다 (전체 보호)
fn configure_item_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/items")
            .wrap(AuthMiddleware::required())
            .service(handlers::items::create_item)
            .service(handlers::items::get_items),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/api/health
/// ```
#[actix_web::get("/api/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "keeptrack_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
