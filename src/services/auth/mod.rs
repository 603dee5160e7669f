//! 인증 및 보안 서비스 모듈
//!
//! JWT 토큰 관리, 비밀번호 해싱, Google OAuth 2.0 소셜 로그인을 담당하는
//! 서비스들을 제공합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명, 액세스/리프레시 비밀키 분리
//! - bcrypt 솔트 해싱 (상수 시간 비교)
//! - CSRF 방지 (서명된 OAuth state 매개변수)

pub mod google_auth_service;
pub mod password_service;
pub mod token_service;

pub use google_auth_service::{GoogleAuthService, GoogleOAuthSettings};
pub use password_service::PasswordService;
pub use token_service::TokenService;
