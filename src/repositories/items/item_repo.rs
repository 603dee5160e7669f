//! 추적 항목 리포지토리 구현
//!
//! 추적 항목 엔티티의 데이터 액세스 계층입니다.
//! 모든 조회는 소유자 기준으로만 이루어집니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    Collection, IndexModel,
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::items::Item;

/// 추적 항목 데이터 액세스 리포지토리
pub struct ItemRepository {
    db: Arc<Database>,
}

impl ItemRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Item> {
        self.db.get_database().collection::<Item>("items")
    }

    /// 새 추적 항목 저장
    pub async fn create(&self, mut item: Item) -> Result<Item, AppError> {
        let result = self
            .collection()
            .insert_one(&item)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        item.id = result.inserted_id.as_object_id();

        Ok(item)
    }

    /// 소유자의 모든 추적 항목 조회 (최신순)
    pub async fn find_by_owner(&self, owner: &ObjectId) -> Result<Vec<Item>, AppError> {
        let cursor = self
            .collection()
            .find(doc! { "owner": *owner })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 데이터베이스 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        // 소유자 조회 인덱스
        let owner_index = IndexModel::builder()
            .keys(doc! { "owner": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("owner_created_at".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([owner_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
