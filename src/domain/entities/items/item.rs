//! Item Entity Implementation
//!
//! 사용자가 추적하는 항목(청구서, 보험, 보증서 등) 엔티티입니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 추적 항목 분류
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Bill,
    Policy,
    Warranty,
    Other,
}

impl Default for ItemCategory {
    fn default() -> Self {
        ItemCategory::Bill
    }
}

/// 추적 항목 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Open,
    Paid,
    Expired,
}

impl Default for ItemStatus {
    fn default() -> Self {
        ItemStatus::Open
    }
}

/// 추적 항목 엔티티
///
/// 모든 항목은 소유자에게 귀속되며, 소유자 본인만 조회/생성할 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유자 사용자 ID
    pub owner: ObjectId,
    /// 항목 제목
    pub title: String,
    /// 항목 분류
    pub category: ItemCategory,
    /// 금액
    pub amount: f64,
    /// 만기/납부 기한
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime>,
    /// 항목 상태
    pub status: ItemStatus,
    /// 메모
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Item {
    /// 새 추적 항목 생성
    pub fn new(
        owner: ObjectId,
        title: String,
        category: ItemCategory,
        amount: f64,
        due_date: Option<DateTime>,
        status: ItemStatus,
        notes: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            owner,
            title,
            category,
            amount,
            due_date,
            status,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_status_defaults() {
        assert_eq!(ItemCategory::default(), ItemCategory::Bill);
        assert_eq!(ItemStatus::default(), ItemStatus::Open);
    }

    #[test]
    fn test_category_serialization_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ItemCategory::Warranty).unwrap(),
            "\"warranty\""
        );
        assert_eq!(
            serde_json::to_string(&ItemStatus::Paid).unwrap(),
            "\"paid\""
        );
    }

    #[test]
    fn test_new_item() {
        let owner = ObjectId::new();
        let item = Item::new(
            owner,
            "전기요금".to_string(),
            ItemCategory::Bill,
            45000.0,
            None,
            ItemStatus::Open,
            None,
        );

        assert_eq!(item.owner, owner);
        assert!(item.id.is_none());
        assert_eq!(item.status, ItemStatus::Open);
    }
}
