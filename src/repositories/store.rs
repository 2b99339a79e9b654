//! # Credential Store 인터페이스
//!
//! 로컬 자격 증명과 OAuth 신원의 영속 저장소 계약입니다.
//!
//! 유일성은 반드시 저장소 계층에서 원자적으로 강제해야 합니다
//! (유니크 인덱스 또는 단일 락). 매니저는 사전 존재 확인 없이
//! 저장소가 돌려주는 `NotFound`/`Conflict`를 그대로 해석합니다.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::OAuthProvider;
use crate::domain::{LocalCredential, OAuthIdentity, ProviderIdentity, UserId};
use crate::errors::errors::AppError;

/// 위반된 유일성 키
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    /// 사용자당 로컬 계정 1개
    LocalUserId,
    /// 로컬 이메일 전역 유일
    LocalEmail,
    /// (user_id, provider)
    UserProvider,
    /// (provider, provider_account_id)
    ProviderAccount,
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UniqueKey::LocalUserId => "local credential for user",
            UniqueKey::LocalEmail => "local credential email",
            UniqueKey::UserProvider => "oauth identity for user and provider",
            UniqueKey::ProviderAccount => "oauth identity for provider account",
        };
        f.write_str(name)
    }
}

/// 저장소 에러
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("unique constraint violated: {0}")]
    Conflict(UniqueKey),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound("record not found".to_string()),
            StoreError::Conflict(key) => AppError::Conflict(format!("{} already exists", key)),
            StoreError::Corrupt(msg) => AppError::Internal(format!("corrupt stored record: {}", msg)),
            unavailable @ StoreError::Unavailable(_) => {
                AppError::unavailable("credential store unavailable", unavailable)
            }
        }
    }
}

/// 로컬 자격 증명 저장소
#[async_trait]
pub trait LocalCredentialStore: Send + Sync {
    /// 새 레코드 저장. user_id 또는 email 중복 시 `Conflict`.
    async fn insert(&self, credential: LocalCredential) -> StoreResult<LocalCredential>;

    async fn find_by_user_id(&self, user_id: &UserId) -> StoreResult<Option<LocalCredential>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<LocalCredential>>;

    /// 이메일을 교체하고 인증 상태를 `false`로 되돌립니다.
    ///
    /// 다른 사용자가 쓰는 이메일이면 `Conflict(LocalEmail)`, 레코드가 없으면 `NotFound`.
    async fn update_email(
        &self,
        user_id: &UserId,
        email: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<LocalCredential>;

    /// 이메일 인증 상태를 설정합니다. 이미 같은 값이면 레코드를 바꾸지 않습니다.
    async fn set_email_verified(
        &self,
        user_id: &UserId,
        verified: bool,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<LocalCredential>;

    async fn delete(&self, user_id: &UserId) -> StoreResult<()>;
}

/// OAuth 신원 저장소
#[async_trait]
pub trait OAuthIdentityStore: Send + Sync {
    /// 새 연동 저장. (user_id, provider) 또는 (provider, provider_account_id) 중복 시 `Conflict`.
    async fn insert(&self, identity: OAuthIdentity) -> StoreResult<OAuthIdentity>;

    async fn find(&self, user_id: &UserId, provider: OAuthProvider) -> StoreResult<Option<OAuthIdentity>>;

    /// 사용자의 모든 연동을 프로바이더 이름 순으로 반환합니다.
    async fn list_by_user(&self, user_id: &UserId) -> StoreResult<Vec<OAuthIdentity>>;

    /// 이메일/인증 상태를 갱신합니다.
    ///
    /// 저장된 provider_account_id가 `identity.provider_account_id`와 같을 때만 갱신하며,
    /// 조건에 맞는 레코드가 없으면 `NotFound`.
    async fn update_profile(
        &self,
        user_id: &UserId,
        provider: OAuthProvider,
        identity: &ProviderIdentity,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<OAuthIdentity>;

    async fn delete(&self, user_id: &UserId, provider: OAuthProvider) -> StoreResult<()>;

    /// 사용자의 모든 연동을 삭제하고 삭제된 개수를 반환합니다.
    async fn delete_all(&self, user_id: &UserId) -> StoreResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::errors::ErrorKind;

    #[test]
    fn test_store_error_mapping() {
        assert_eq!(AppError::from(StoreError::NotFound).kind(), ErrorKind::NotFound);
        assert_eq!(
            AppError::from(StoreError::Conflict(UniqueKey::LocalEmail)).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            AppError::from(StoreError::Unavailable("timeout".into())).kind(),
            ErrorKind::Unavailable
        );
        assert_eq!(AppError::from(StoreError::Corrupt("bad id".into())).kind(), ErrorKind::Internal);
    }
}
