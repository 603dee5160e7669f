//! 추적 항목 요청 DTO

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::items::{ItemCategory, ItemStatus};

/// 추적 항목 생성 요청
///
/// `category`와 `status`는 생략 시 각각 bill / open이 적용됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    pub category: Option<ItemCategory>,

    pub amount: Option<f64>,

    pub due_date: Option<DateTime<Utc>>,

    pub status: Option<ItemStatus>,

    pub notes: Option<String>,
}
