//! # OAuth 계정 연동 서비스
//!
//! 사용자와 외부 프로바이더 계정의 연동 레코드를 생성, 동기화, 삭제합니다.
//!
//! ## 동기화 흐름
//!
//! ```text
//! sync_oauth_user(user, provider, credential)
//!   1. 연동 레코드 조회         없으면 NotFound (프로바이더 호출 전)
//!   2. 프로바이더 교환          거부되면 Unauthorized
//!   3. 외부 계정 ID 비교        다르면 Conflict (신원 드리프트)
//!   4. 조건부 갱신              email, is_verified, updated_at
//! ```
//!
//! `provider_account_id`와 `created_at`은 연동 이후 바뀌지 않습니다.
//! 갱신은 저장된 외부 계정 ID를 조건으로 하므로 동시에 재연동된 레코드를 덮어쓰지 않습니다.

use std::sync::Arc;

use crate::config::OAuthProvider;
use crate::domain::{OAuthIdentity, ProviderCredential, ProviderIdentity, UserId};
use crate::errors::errors::{AppError, AppResult};
use crate::repositories::store::{OAuthIdentityStore, StoreError};
use crate::services::auth::ProviderClient;
use crate::utils::time_utils::now_millis;

fn not_linked(user_id: &UserId, provider: OAuthProvider) -> AppError {
    AppError::NotFound(format!("{} 계정이 연동되어 있지 않습니다: {}", provider, user_id))
}

/// OAuth 계정 관리자
pub struct OAuthUserService {
    store: Arc<dyn OAuthIdentityStore>,
    provider_client: Arc<dyn ProviderClient>,
}

impl OAuthUserService {
    pub fn new(store: Arc<dyn OAuthIdentityStore>, provider_client: Arc<dyn ProviderClient>) -> Self {
        Self { store, provider_client }
    }

    /// 프로바이더 교환 (재시도 없음)
    async fn exchange(
        &self,
        provider: OAuthProvider,
        credential: &ProviderCredential,
    ) -> AppResult<ProviderIdentity> {
        let identity = match credential {
            ProviderCredential::Code(code) => self.provider_client.exchange_code(provider, code).await,
            ProviderCredential::AccessToken(token) => {
                self.provider_client.exchange_token(provider, token).await
            }
        };

        identity.map_err(|e| {
            log::warn!("{} 교환 실패 ({}): {}", provider, credential.kind(), e);
            AppError::from(e)
        })
    }

    /// 새 OAuth 연동 생성
    ///
    /// `access_token`과 `code` 중 정확히 하나만 채워져 있어야 합니다.
    ///
    /// # 반환값
    ///
    /// * `Err(AppError::InvalidInput)` - 자격 증명 누락/중복 또는 미설정 프로바이더
    /// * `Err(AppError::Unauthorized)` - 프로바이더가 자격 증명을 거부
    /// * `Err(AppError::Conflict)` - 이미 같은 프로바이더가 연동된 사용자이거나
    ///   외부 계정이 다른 사용자에게 연동됨
    pub async fn create_oauth_user(
        &self,
        user_id: UserId,
        provider: OAuthProvider,
        access_token: Option<&str>,
        code: Option<&str>,
    ) -> AppResult<OAuthIdentity> {
        let credential = ProviderCredential::from_parts(access_token, code)?;
        let identity = self.exchange(provider, &credential).await?;

        let linked = self.store
            .insert(OAuthIdentity::link(user_id, provider, identity, now_millis()))
            .await?;

        log::info!("{} 계정 연동: {} -> {}", provider, user_id, linked.provider_account_id);
        Ok(linked)
    }

    /// 프로바이더의 현재 프로필로 연동 레코드를 동기화합니다.
    ///
    /// 프로바이더 상태가 그대로면 반복 호출해도 `updated_at` 외에는 변하지 않습니다.
    pub async fn sync_oauth_user(
        &self,
        user_id: UserId,
        provider: OAuthProvider,
        access_token: Option<&str>,
        code: Option<&str>,
    ) -> AppResult<OAuthIdentity> {
        let credential = ProviderCredential::from_parts(access_token, code)?;

        let existing = self.store
            .find(&user_id, provider)
            .await?
            .ok_or_else(|| not_linked(&user_id, provider))?;

        let identity = self.exchange(provider, &credential).await?;

        if identity.provider_account_id != existing.provider_account_id {
            log::warn!(
                "{} 신원 드리프트: {} (저장 {}, 수신 {})",
                provider,
                user_id,
                existing.provider_account_id,
                identity.provider_account_id
            );
            return Err(AppError::Conflict(format!(
                "{} 계정이 연동된 계정과 다릅니다",
                provider
            )));
        }

        let synced = self.store
            .update_profile(&user_id, provider, &identity, now_millis())
            .await
            .map_err(|e| match e {
                // 교환 도중 삭제되었거나 다른 계정으로 재연동됨
                StoreError::NotFound => AppError::Conflict(format!(
                    "{} 연동이 동기화 중에 변경되었습니다",
                    provider
                )),
                other => other.into(),
            })?;

        log::debug!("{} 계정 동기화: {}", provider, user_id);
        Ok(synced)
    }

    /// 특정 프로바이더 연동 삭제
    pub async fn delete_oauth_user(&self, user_id: UserId, provider: OAuthProvider) -> AppResult<()> {
        self.store.delete(&user_id, provider).await.map_err(|e| match e {
            StoreError::NotFound => not_linked(&user_id, provider),
            other => other.into(),
        })?;

        log::warn!("{} 계정 연동 해제: {}", provider, user_id);
        Ok(())
    }

    /// 사용자의 모든 연동 삭제. 삭제된 개수를 반환합니다.
    pub async fn delete_all_oauth_users(&self, user_id: UserId) -> AppResult<u64> {
        let deleted = self.store.delete_all(&user_id).await?;

        if deleted == 0 {
            return Err(AppError::NotFound(format!("연동된 OAuth 계정이 없습니다: {}", user_id)));
        }

        log::warn!("OAuth 연동 {}개 해제: {}", deleted, user_id);
        Ok(deleted)
    }

    pub async fn get_oauth_user(&self, user_id: UserId, provider: OAuthProvider) -> AppResult<OAuthIdentity> {
        self.store
            .find(&user_id, provider)
            .await?
            .ok_or_else(|| not_linked(&user_id, provider))
    }

    /// 사용자의 연동 목록 (프로바이더 순)
    pub async fn list_oauth_users(&self, user_id: UserId) -> AppResult<Vec<OAuthIdentity>> {
        Ok(self.store.list_by_user(&user_id).await?)
    }
}
