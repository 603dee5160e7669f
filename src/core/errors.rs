//! # Application Error Handling System
//!
//! 백엔드 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror` 기반의 전역 에러 타입과 Actix-Web `ResponseError` 구현을 결합하여
//! 모든 핸들러·서비스·리포지토리 계층이 동일한 에러 어휘를 사용하도록 합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 필수 필드 누락, 형식 오류 |
//! | `AuthenticationError` | 401 Unauthorized | 잘못된 자격 증명, 토큰 만료/위조 |
//! | `NotFound` | 404 Not Found | 리소스 없음 |
//! | `ConflictError` | 409 Conflict | 이메일 중복, 프로바이더 충돌 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `ExternalServiceError` | 500 Internal Server Error | Google API 오류 |
//! | `InternalError` | 500 Internal Server Error | 해싱 실패 등 예상치 못한 오류 |
//!
//! ## 응답 형식
//!
//! 모든 에러는 다음 JSON 형식으로 직렬화됩니다:
//!
//! ```json
//! { "error": "unauthorized", "message": "Invalid credentials" }
//! ```
//!
//! ## 정보 노출 정책
//!
//! - 인증 실패 메시지는 의도적으로 모호하게 유지합니다. 이메일 존재 여부를
//!   절대 확인해주지 않습니다 (계정 열거 공격 방지).
//! - 5xx 에러의 상세 내용은 서버 로그에만 기록하고, 개발 환경이 아니면
//!   클라이언트에는 일반 메시지만 전달합니다.

use thiserror::Error;

use crate::config::Environment;

/// 애플리케이션 전역 에러 타입
///
/// 백엔드 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// `actix_web::ResponseError` 구현을 통해 HTTP 응답으로 자동 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (연결 실패, 쿼리 오류 등)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (필수 필드 누락, 이메일 형식, 비밀번호 길이 등)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 요청된 리소스가 존재하지 않음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (이메일 중복 가입, 프로바이더 충돌 등)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (잘못된 자격 증명, 누락/만료/위조 토큰, 삭제된 사용자)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 외부 서비스 에러 (Google OAuth API 통신 실패 등)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (해싱 실패, 설정 오류 등 예상치 못한 오류)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트 측 분기 처리를 위한 에러 종류 식별자
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::AuthenticationError(_) => "unauthorized",
            AppError::DatabaseError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => "internal_error",
        }
    }

    /// 서버 내부 사정을 노출할 수 있는 에러인지 여부 (5xx 계열)
    fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_)
                | AppError::ExternalServiceError(_)
                | AppError::InternalError(_)
        )
    }

    /// 클라이언트에게 전달할 메시지
    ///
    /// 5xx 에러의 상세 내용은 개발 환경에서만 노출합니다.
    fn client_message(&self) -> String {
        let detail = match self {
            AppError::DatabaseError(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::ExternalServiceError(msg)
            | AppError::InternalError(msg) => msg.clone(),
        };

        if self.is_internal() && !Environment::current().is_development() {
            "Internal server error".to_string()
        } else {
            detail
        }
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 에러 타입을 적절한 상태 코드와 표준 JSON 본문으로 변환합니다.
    /// 5xx 에러는 상세 내용을 서버 로그에 남깁니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if self.is_internal() {
            log::error!("{}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": self.kind(),
            "message": self.client_message(),
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// # Examples
///
/// ```rust,ignore
/// use crate::core::errors::ErrorContext;
///
/// let client_options = ClientOptions::parse(&uri).await
///     .context("Failed to parse MongoDB URI")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
