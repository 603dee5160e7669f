//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 실행 환경 및 비밀번호 해싱 관련 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
///
/// `ENVIRONMENT` 환경변수(없으면 `NODE_ENV`, 둘 다 없으면 production)로 결정됩니다.
/// 쿠키 Secure 플래그, bcrypt cost, 에러 상세 노출 여부가 환경에 따라 달라집니다.
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// 현재 실행 환경을 반환합니다.
    pub fn current() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string()))
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 운영 환경 여부
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// 개발 환경 여부 (에러 상세 메시지 노출 허용)
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// 비밀번호 해싱 설정
///
/// bcrypt cost는 보안 강도와 응답 시간의 트레이드오프이므로
/// 환경별로 다른 기본값을 사용합니다.
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST` 환경변수가 4~15 범위의 유효한 값이면 그 값을,
    /// 아니면 현재 실행 환경의 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 환경별 bcrypt cost 기본값
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    /// MongoDB 연결 URI를 반환합니다.
    ///
    /// # Panics
    ///
    /// `MONGODB_URI` 환경변수가 설정되지 않은 경우.
    /// (시작 시 [`crate::config::validate_required_env`]에서 먼저 검증됩니다)
    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").expect("MONGODB_URI must be set")
    }

    /// 사용할 데이터베이스 이름 (기본값: keeptrack_dev)
    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "keeptrack_dev".to_string())
    }
}

/// 프론트엔드 클라이언트 설정
///
/// CORS 허용 오리진과 OAuth 완료 후 리다이렉트 URL 구성에 사용됩니다.
pub struct ClientConfig;

impl ClientConfig {
    /// 프론트엔드 오리진을 반환합니다.
    ///
    /// # Panics
    ///
    /// `CLIENT_ORIGIN` 환경변수가 설정되지 않은 경우.
    pub fn origin() -> String {
        env::var("CLIENT_ORIGIN").expect("CLIENT_ORIGIN must be set")
    }
}
