//! 추적 항목 서비스 구현
//!
//! 인증된 사용자의 추적 항목 생성과 조회를 담당합니다.

use std::sync::Arc;

use mongodb::bson::{DateTime, oid::ObjectId};

use crate::core::errors::AppError;
use crate::domain::dto::items::CreateItemRequest;
use crate::domain::entities::items::Item;
use crate::repositories::items::item_repo::ItemRepository;
use crate::utils::string_utils::{clean_optional_string, validate_required_string};

/// 추적 항목 서비스
pub struct ItemService {
    item_repo: Arc<ItemRepository>,
}

impl ItemService {
    pub fn new(item_repo: Arc<ItemRepository>) -> Self {
        Self { item_repo }
    }

    /// 인증된 사용자 소유의 새 추적 항목 생성
    ///
    /// 소유자는 요청 본문이 아니라 세션 컨텍스트의 사용자 ID에서만 옵니다.
    pub async fn create_item(
        &self,
        owner_id: &str,
        request: CreateItemRequest,
    ) -> Result<Item, AppError> {
        let owner = ObjectId::parse_str(owner_id)
            .map_err(|_| AppError::ValidationError("Invalid id format".to_string()))?;

        let title = validate_required_string(&request.title, "title")?;

        let item = Item::new(
            owner,
            title,
            request.category.unwrap_or_default(),
            request.amount.unwrap_or(0.0),
            request.due_date.map(DateTime::from_chrono),
            request.status.unwrap_or_default(),
            clean_optional_string(request.notes),
        );

        self.item_repo.create(item).await
    }

    /// 인증된 사용자의 추적 항목 목록 조회 (최신순)
    pub async fn list_items(&self, owner_id: &str) -> Result<Vec<Item>, AppError> {
        let owner = ObjectId::parse_str(owner_id)
            .map_err(|_| AppError::ValidationError("Invalid id format".to_string()))?;

        self.item_repo.find_by_owner(&owner).await
    }
}
