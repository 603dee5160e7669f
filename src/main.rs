//! KeepTrack 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB 연결을 설정하고 JWT 인증 기반의 REST API를 제공합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use keeptrack_backend::config::{self, ClientConfig, ServerConfig};
use keeptrack_backend::db::Database;
use keeptrack_backend::repositories::items::ItemRepository;
use keeptrack_backend::repositories::users::UserRepository;
use keeptrack_backend::routes::configure_all_routes;
use keeptrack_backend::services::auth::{
    GoogleAuthService, GoogleOAuthSettings, PasswordService, TokenService,
};
use keeptrack_backend::services::items::ItemService;
use keeptrack_backend::services::users::UserService;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

/// 시작 시점에 한 번 구성되어 라우팅 계층에 주입되는 서비스 집합
#[derive(Clone)]
struct AppServices {
    token_service: web::Data<TokenService>,
    user_service: web::Data<UserService>,
    item_service: web::Data<ItemService>,
    google_service: web::Data<GoogleAuthService>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 KeepTrack 백엔드 시작중...");

    // 필수 환경변수 검증 (누락 시 즉시 종료)
    if let Err(msg) = config::validate_required_env() {
        error!("❌ {}", msg);
        std::process::exit(1);
    }

    // 데이터 스토어 초기화
    let database = initialize_database().await;

    // 서비스 구성 (전역 레지스트리 없이 명시적 의존성 주입)
    let services = build_services(database).await;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(services).await
}

/// MongoDB 연결을 초기화합니다
///
/// 연결 실패 시 애플리케이션이 종료됩니다.
async fn initialize_database() -> Arc<Database> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await.expect("데이터베이스 연결 실패"));

    info!("✅ MongoDB 연결 성공");

    database
}

/// 리포지토리와 서비스를 구성합니다
///
/// 리포지토리 → 서비스 순서로 생성하며, 각 인스턴스는 `web::Data`로
/// 래핑되어 라우팅 계층과 세션 미들웨어에 전달됩니다.
///
/// 이메일 유니크 인덱스는 동시 가입 경쟁의 최종 방어선이므로
/// 인덱스 생성 실패는 기동 실패로 처리합니다.
async fn build_services(database: Arc<Database>) -> AppServices {
    let user_repo = Arc::new(UserRepository::new(Arc::clone(&database)));
    let item_repo = Arc::new(ItemRepository::new(Arc::clone(&database)));

    user_repo
        .create_indexes()
        .await
        .expect("사용자 인덱스 생성 실패");
    item_repo
        .create_indexes()
        .await
        .expect("항목 인덱스 생성 실패");

    info!("✅ MongoDB 인덱스 준비 완료");

    let password_service = Arc::new(PasswordService::from_env());

    AppServices {
        token_service: web::Data::new(TokenService::from_env()),
        user_service: web::Data::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_service),
        )),
        item_service: web::Data::new(ItemService::new(Arc::clone(&item_repo))),
        google_service: web::Data::new(GoogleAuthService::new(
            GoogleOAuthSettings::from_env(),
            Arc::clone(&user_repo),
        )),
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화, Rate Limiting 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(services: AppServices) -> std::io::Result<()> {
    let host = ServerConfig::host();
    let port = ServerConfig::port();

    info!("🌐 서버가 http://{}:{} 에서 실행중입니다", host, port);
    info!("📍 Health check: http://{}:{}/api/health", host, port);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .unwrap();

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            // 기존 미들웨어들
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 서비스 주입
            .app_data(services.token_service.clone())
            .app_data(services.user_service.clone())
            .app_data(services.item_service.clone())
            .app_data(services.google_service.clone())
            // 라우트 설정
            .configure(configure_all_routes)
    })
    .bind((host, port))?
    .workers(4) // 워커 스레드 수
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            dotenv::from_filename(".env.prod").ok();
        }
        "dev" => {
            dotenv::from_filename(".env.dev").ok();
        }
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 RUST_LOG를 기반으로 로깅 레벨을 설정합니다.
/// 기본값은 info 레벨이며, actix_web은 debug 레벨로 설정됩니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 설정된 프론트엔드 오리진만 허용하며, 리프레시 쿠키 전송을 위해
/// 자격 증명을 지원합니다.
fn configure_cors() -> Cors {
    Cors::default()
        // 허용할 Origin: 설정된 프론트엔드 오리진 하나뿐
        .allowed_origin(&ClientConfig::origin())
        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        // 자격 증명(쿠키) 지원
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
