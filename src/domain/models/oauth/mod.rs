//! OAuth 신원 모델 모듈

pub mod google_user;

pub use google_user::GoogleUserInfo;
