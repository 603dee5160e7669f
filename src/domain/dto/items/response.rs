//! 추적 항목 응답 DTO

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::items::{Item, ItemCategory, ItemStatus};

/// 클라이언트 전달용 추적 항목
///
/// 소유자 ID는 응답에 포함하지 않습니다. 항목은 항상 인증된 사용자 본인의
/// 것만 조회되므로 노출할 이유가 없습니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: String,
    pub title: String,
    pub category: ItemCategory,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id_string().unwrap_or_default(),
            title: item.title,
            category: item.category,
            amount: item.amount,
            due_date: item.due_date.map(|d| d.to_chrono()),
            status: item.status,
            notes: item.notes,
            created_at: item.created_at.to_chrono(),
            updated_at: item.updated_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_item_response_hides_owner() {
        let item = Item::new(
            ObjectId::new(),
            "Car insurance".to_string(),
            ItemCategory::Policy,
            120.5,
            None,
            ItemStatus::Open,
            Some("renew in June".to_string()),
        );

        let json = serde_json::to_string(&ItemResponse::from(item)).unwrap();
        assert!(!json.contains("owner"));
        assert!(json.contains("\"category\":\"policy\""));
        assert!(json.contains("\"status\":\"open\""));
    }
}
