//! 비밀번호 해싱 서비스 구현
//!
//! bcrypt 기반의 단방향 솔트 해싱과 검증을 담당합니다.

use crate::config::PasswordConfig;
use crate::core::errors::AppError;

/// 비밀번호 해싱 서비스
///
/// bcrypt는 호출마다 임의 솔트를 생성해 출력에 포함하므로
/// 같은 입력을 두 번 해싱해도 결과가 다릅니다. 검증은 bcrypt가 제공하는
/// 상수 시간 비교를 사용합니다.
pub struct PasswordService {
    /// bcrypt cost (4~15, 환경별 기본값)
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// 환경 설정의 cost로 서비스를 생성합니다.
    pub fn from_env() -> Self {
        Self::new(PasswordConfig::bcrypt_cost())
    }

    /// 평문 비밀번호를 해싱합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 해싱 실패. 호출한 연산 전체가 실패해야
    ///   합니다. 해싱되지 않은 비밀번호로 사용자가 생성되는 일은 없습니다.
    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
    }

    /// 평문 비밀번호를 저장된 해시와 대조합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 해시 파싱 실패 등 검증 자체가 불가능한 경우
    pub fn verify(&self, plaintext: &str, credential: &str) -> Result<bool, AppError> {
        bcrypt::verify(plaintext, credential)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PasswordService {
        // 테스트에서는 최소 cost 사용
        PasswordService::new(4)
    }

    #[test]
    fn test_hash_then_verify() {
        let service = service();
        let hash = service.hash("secret1").unwrap();

        assert!(service.verify("secret1", &hash).unwrap());
        assert!(!service.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_same_input_produces_different_hashes() {
        let service = service();
        let first = service.hash("secret1").unwrap();
        let second = service.hash("secret1").unwrap();

        // 호출별 임의 솔트
        assert_ne!(first, second);
        assert!(service.verify("secret1", &first).unwrap());
        assert!(service.verify("secret1", &second).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_credential() {
        let service = service();
        assert!(service.verify("secret1", "not-a-bcrypt-hash").is_err());
    }
}
