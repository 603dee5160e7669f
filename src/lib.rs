//! KeepTrack 백엔드
//!
//! 개인 추적(청구서·보험·보증서) 웹 애플리케이션의 백엔드 서비스입니다.
//! JWT 토큰 기반 인증, Google OAuth 2.0 소셜 로그인, 그리고 MongoDB 기반의
//! 추적 항목 관리를 제공합니다.
//!
//! # Features
//!
//! - **로컬 인증**: 이메일/비밀번호 가입·로그인 (bcrypt 해싱)
//! - **JWT 인증**: 액세스/리프레시 토큰 분리 서명, 상태 없는 인증
//! - **OAuth 2.0**: Google 소셜 로그인과 계정 연동
//! - **토큰 무효화**: token_version 카운터 기반 전역 로그아웃
//! - **추적 항목**: 인증된 사용자별 항목 CRUD
//! - **MongoDB**: 유니크 인덱스와 원자적 갱신으로 일관성 보장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 세션 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, DTO 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (시작 시 1회 구성, 명시적 주입)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use keeptrack_backend::repositories::users::UserRepository;
//! use keeptrack_backend::services::auth::{PasswordService, TokenService};
//! use keeptrack_backend::services::users::UserService;
//!
//! // 시작 시점에 의존성을 명시적으로 구성
//! let user_repo = Arc::new(UserRepository::new(database));
//! let passwords = Arc::new(PasswordService::from_env());
//! let user_service = UserService::new(user_repo, passwords);
//!
//! // 사용자 생성 및 토큰 발급
//! let user = user_service.register(request).await?;
//! let tokens = TokenService::from_env().generate_token_pair(&user)?;
//! ```

pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
