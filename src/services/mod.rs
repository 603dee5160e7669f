//! 비즈니스 로직 서비스 모듈
//!
//! 핸들러와 리포지토리 사이의 비즈니스 로직 계층입니다.
//! 모든 서비스는 시작 시점에 의존성과 함께 한 번 생성되어
//! `web::Data`로 라우팅 계층에 주입됩니다.

pub mod auth;
pub mod items;
pub mod users;
