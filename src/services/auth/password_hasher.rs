//! # 비밀번호 해싱
//!
//! 로컬 계정 비밀번호를 bcrypt로 해싱하고 검증합니다.
//! 평문 비밀번호와 해시 값은 어떤 경로로도 로그에 남기지 않습니다.
//!
//! ## 환경별 bcrypt cost
//!
//! | 환경 | 기본 cost | 비고 |
//! |------|-----------|------|
//! | development / test | 4 | 빠른 테스트 |
//! | staging | 10 | 운영 근사 |
//! | production | 12 | 보안 우선 |
//!
//! `BCRYPT_COST` 환경 변수(4-15)로 덮어쓸 수 있습니다.
//!
//! bcrypt는 CPU 바운드 연산이므로 `spawn_blocking`으로 런타임 워커 밖에서 실행합니다.
//! 72바이트를 넘는 입력은 bcrypt가 잘라내므로 해싱을 거부하고 검증에서는 불일치로 처리합니다.

use std::time::Instant;

use async_trait::async_trait;

use crate::config::PasswordConfig;
use crate::domain::dto::MAX_PASSWORD_BYTES;
use crate::errors::errors::{AppError, AppResult, ErrorContext};

/// bcrypt가 허용하는 cost 범위
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// 비밀번호 해싱 협력자
///
/// 로컬 계정 관리자는 이 트레이트에만 의존하므로 테스트에서 낮은 cost 구현을 주입할 수 있습니다.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// 평문 비밀번호를 해싱합니다. 솔트는 구현이 생성합니다.
    async fn hash(&self, plain: &str) -> AppResult<String>;

    /// 평문이 저장된 해시와 일치하는지 확인합니다.
    ///
    /// 손상된 해시는 `false`가 아니라 `Internal` 에러입니다.
    async fn verify(&self, plain: &str, hash: &str) -> AppResult<bool>;
}

/// bcrypt 기반 해셔
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// 지정한 cost로 생성합니다. bcrypt가 허용하지 않는 cost는 `Internal`입니다.
    pub fn new(cost: u32) -> AppResult<Self> {
        if !BCRYPT_COST_RANGE.contains(&cost) {
            return Err(AppError::Internal(format!("unsupported bcrypt cost: {}", cost)));
        }
        Ok(Self { cost })
    }

    /// 환경 설정(`BCRYPT_COST`, `ENVIRONMENT`)에서 cost를 읽어 생성합니다.
    pub fn from_config() -> AppResult<Self> {
        Self::new(PasswordConfig::bcrypt_cost())
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plain: &str) -> AppResult<String> {
        if plain.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::InvalidInput(
                "비밀번호는 UTF-8 기준 72바이트 이하여야 합니다".to_string(),
            ));
        }

        let plain = plain.to_string();
        let cost = self.cost;
        let started = Instant::now();

        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .context("비밀번호 해싱 태스크 실패")?
            .context("비밀번호 해싱 실패")?;

        log::debug!("Password hashing took: {:?} (cost {})", started.elapsed(), cost);
        Ok(hashed)
    }

    async fn verify(&self, plain: &str, hash: &str) -> AppResult<bool> {
        // 저장된 해시는 72바이트 이하 입력에서만 만들어지므로 잘린 접두사로 일치시키지 않음
        if plain.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        let plain = plain.to_string();
        let hash = hash.to_string();
        let started = Instant::now();

        let is_valid = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
            .await
            .context("비밀번호 검증 태스크 실패")?
            .context("비밀번호 검증 실패")?;

        log::debug!("Password verification took: {:?}", started.elapsed());
        Ok(is_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::errors::ErrorKind;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = BcryptPasswordHasher::new(4).unwrap();
        let hashed = hasher.hash("Sup3rSecret").await.unwrap();

        assert_ne!(hashed, "Sup3rSecret");
        assert!(hasher.verify("Sup3rSecret", &hashed).await.unwrap());
        assert!(!hasher.verify("WrongPass1", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_uses_fresh_salt() {
        let hasher = BcryptPasswordHasher::new(4).unwrap();
        assert_ne!(
            hasher.hash("Sup3rSecret").await.unwrap(),
            hasher.hash("Sup3rSecret").await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_internal() {
        let hasher = BcryptPasswordHasher::new(4).unwrap();
        let err = hasher.verify("Sup3rSecret", "not-a-bcrypt-hash").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_input_beyond_bcrypt_limit_never_matches() {
        let hasher = BcryptPasswordHasher::new(4).unwrap();
        let boundary = format!("Aa1{}", "가".repeat(23));
        let hashed = hasher.hash(&boundary).await.unwrap();

        // 앞 72바이트가 같은 더 긴 입력
        let longer = format!("{}나", boundary);
        assert!(!hasher.verify(&longer, &hashed).await.unwrap());
        assert_eq!(hasher.hash(&longer).await.unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_rejects_out_of_range_cost() {
        assert!(BcryptPasswordHasher::new(3).is_err());
        assert!(BcryptPasswordHasher::new(32).is_err());
        assert_eq!(BcryptPasswordHasher::new(10).unwrap().cost(), 10);
    }
}
