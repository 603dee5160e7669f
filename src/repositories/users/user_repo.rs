//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하며, 이메일 유일성과 토큰 버전 갱신은
//! 저장소 수준의 원자적 연산으로만 보장합니다.
//!
//! ## 동시성 규칙
//!
//! - **이메일 유일성**: `email` 유니크 인덱스가 최종 권위입니다.
//!   서비스 계층의 사전 중복 검사는 UX용이고, 동시 가입 경쟁은
//!   insert 시점의 duplicate key 에러(11000)를 409로 매핑하여 처리합니다.
//! - **Google 연동**: `google_id`가 아직 없는 경우에만 성공하는
//!   compare-and-set(`find_one_and_update`)으로 수행합니다.
//! - **토큰 버전**: `$inc` 원자 연산으로만 증가합니다.

use std::sync::Arc;

use mongodb::{
    Collection, IndexModel,
    bson::{DateTime, doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::users::user::User;

/// 사용자 데이터 액세스 리포지토리
///
/// `users` 컬렉션에 대한 모든 MongoDB 연산을 담당합니다.
/// 이메일 인자는 항상 정규화(trim + 소문자)된 값이어야 합니다.
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>("users")
    }

    /// 이메일 주소로 사용자 조회
    ///
    /// 호출자는 정규화된 이메일을 전달해야 합니다. 저장 역시 정규화된 값으로만
    /// 이루어지므로 이 조회는 사실상 대소문자 무관 조회입니다.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// Google 외부 식별자로 사용자 조회
    ///
    /// 연동 로그인의 1차 조회 키입니다. 이메일 조회보다 우선합니다.
    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "google_id": google_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 사용자 조회
    ///
    /// # 인자
    ///
    /// * `id` - MongoDB ObjectId의 16진수 문자열 표현
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid id format".to_string()))?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 생성
    ///
    /// 이메일 유일성은 유니크 인덱스가 보장합니다. 동시 가입 경쟁으로
    /// duplicate key 에러가 발생하면 사전 검사와 동일한 409로 매핑되므로,
    /// 호출자 입장에서 경쟁 유무는 구분되지 않습니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError(
                        "An account with this email already exists".to_string(),
                    )
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// Google 신원을 기존 사용자에 연동
    ///
    /// `google_id`가 아직 비어 있는 경우에만 성공하는 CAS 업데이트입니다.
    /// 동시에 다른 연동이 선행되어 필터가 빗나가면 `Ok(None)`을 반환하며,
    /// 호출자는 이를 충돌로 처리해야 합니다.
    pub async fn link_google_identity(
        &self,
        id: &str,
        google_id: &str,
    ) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid id format".to_string()))?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": object_id, "google_id": null },
                doc! {
                    "$set": {
                        "google_id": google_id,
                        "auth_provider": "google",
                        "updated_at": DateTime::now(),
                    }
                },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 토큰 버전 증가 (전역 로그아웃)
    ///
    /// `$inc` 원자 연산으로 증가시킵니다. 이전에 발급된 모든 리프레시 토큰이
    /// 이 시점부터 무효화됩니다. 카운터는 감소하지 않습니다.
    pub async fn bump_token_version(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("Invalid id format".to_string()))?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! {
                    "$inc": { "token_version": 1 },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행됩니다.
    /// 이메일 유니크 인덱스는 동시 가입 경쟁에서의 최종 방어선이므로
    /// 생성 실패는 기동 실패로 처리해야 합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        // 이메일 유니크 인덱스 (정규화된 값 기준)
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        // Google 연동 조회 인덱스
        let google_id_index = IndexModel::builder()
            .keys(doc! { "google_id": 1 })
            .options(
                IndexOptions::builder()
                    .sparse(true)
                    .name("google_id_sparse".to_string())
                    .build(),
            )
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([email_index, google_id_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// MongoDB duplicate key 에러(11000) 여부 판별
fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = &*err.kind {
        return write_error.code == 11000;
    }
    false
}
