//! Item HTTP Handlers
//!
//! 추적 항목 관련 엔드포인트입니다. 모든 라우트는 세션 미들웨어 뒤에
//! 있으므로 핸들러는 첨부된 신원을 신뢰합니다.

use actix_web::{HttpResponse, get, post, web};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::{AuthenticatedUser, CreateItemRequest, ItemResponse};
use crate::services::items::ItemService;

/// 추적 항목 생성 핸들러
///
/// 소유자는 요청 본문이 아니라 인증된 신원에서 결정됩니다.
///
/// # Endpoint
/// `POST /api/items`
#[post("")]
pub async fn create_item(
    identity: AuthenticatedUser,
    payload: web::Json<CreateItemRequest>,
    item_service: web::Data<ItemService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let item = item_service
        .create_item(&identity.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ItemResponse::from(item)))
}

/// 추적 항목 목록 조회 핸들러
///
/// 인증된 사용자 본인의 항목만 반환합니다.
///
/// # Endpoint
/// `GET /api/items`
#[get("")]
pub async fn get_items(
    identity: AuthenticatedUser,
    item_service: web::Data<ItemService>,
) -> Result<HttpResponse, AppError> {
    let items = item_service.list_items(&identity.user_id).await?;

    let items: Vec<ItemResponse> = items.into_iter().map(ItemResponse::from).collect();

    Ok(HttpResponse::Ok().json(items))
}
