//! # In-Memory Credential Store
//!
//! 프로세스 메모리에 자격 증명을 보관하는 저장소 구현입니다.
//! 테스트와 임베디드 배포에서 사용합니다.
//!
//! 모든 확인-후-쓰기 단계는 하나의 쓰기 락 안에서 수행되므로
//! 동시 호출이 같은 유일성 키를 두고 경쟁해도 중복 레코드가 생기지 않습니다.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::config::OAuthProvider;
use crate::domain::{LocalCredential, OAuthIdentity, ProviderIdentity, UserId};
use crate::repositories::store::{
    LocalCredentialStore, OAuthIdentityStore, StoreError, StoreResult, UniqueKey,
};

#[derive(Default)]
struct LocalState {
    by_user: HashMap<UserId, LocalCredential>,
    by_email: HashMap<String, UserId>,
}

#[derive(Default)]
struct OAuthState {
    by_link: HashMap<(UserId, OAuthProvider), OAuthIdentity>,
    by_account: HashMap<(OAuthProvider, String), UserId>,
}

/// 메모리 기반 자격 증명 저장소
#[derive(Default)]
pub struct InMemoryCredentialStore {
    local: RwLock<LocalState>,
    oauth: RwLock<OAuthState>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 로컬 자격 증명 수
    pub async fn local_count(&self) -> usize {
        self.local.read().await.by_user.len()
    }

    /// 저장된 OAuth 신원 수
    pub async fn oauth_count(&self) -> usize {
        self.oauth.read().await.by_link.len()
    }
}

#[async_trait]
impl LocalCredentialStore for InMemoryCredentialStore {
    async fn insert(&self, credential: LocalCredential) -> StoreResult<LocalCredential> {
        let mut state = self.local.write().await;

        if state.by_user.contains_key(&credential.user_id) {
            return Err(StoreError::Conflict(UniqueKey::LocalUserId));
        }
        if state.by_email.contains_key(&credential.email) {
            return Err(StoreError::Conflict(UniqueKey::LocalEmail));
        }

        state.by_email.insert(credential.email.clone(), credential.user_id);
        state.by_user.insert(credential.user_id, credential.clone());
        Ok(credential)
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> StoreResult<Option<LocalCredential>> {
        Ok(self.local.read().await.by_user.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<LocalCredential>> {
        let state = self.local.read().await;
        Ok(state
            .by_email
            .get(email)
            .and_then(|user_id| state.by_user.get(user_id))
            .cloned())
    }

    async fn update_email(
        &self,
        user_id: &UserId,
        email: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<LocalCredential> {
        let mut state = self.local.write().await;

        let old_email = match state.by_user.get(user_id) {
            Some(credential) => credential.email.clone(),
            None => return Err(StoreError::NotFound),
        };

        match state.by_email.get(email) {
            Some(owner) if owner != user_id => return Err(StoreError::Conflict(UniqueKey::LocalEmail)),
            _ => {}
        }

        state.by_email.remove(&old_email);
        state.by_email.insert(email.to_string(), *user_id);

        let credential = state.by_user.get_mut(user_id).ok_or(StoreError::NotFound)?;
        credential.email = email.to_string();
        credential.email_verified = false;
        credential.updated_at = updated_at;
        Ok(credential.clone())
    }

    async fn set_email_verified(
        &self,
        user_id: &UserId,
        verified: bool,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<LocalCredential> {
        let mut state = self.local.write().await;
        let credential = state.by_user.get_mut(user_id).ok_or(StoreError::NotFound)?;

        if credential.email_verified != verified {
            credential.email_verified = verified;
            credential.updated_at = updated_at;
        }
        Ok(credential.clone())
    }

    async fn delete(&self, user_id: &UserId) -> StoreResult<()> {
        let mut state = self.local.write().await;
        let removed = state.by_user.remove(user_id).ok_or(StoreError::NotFound)?;
        state.by_email.remove(&removed.email);
        Ok(())
    }
}

#[async_trait]
impl OAuthIdentityStore for InMemoryCredentialStore {
    async fn insert(&self, identity: OAuthIdentity) -> StoreResult<OAuthIdentity> {
        let mut state = self.oauth.write().await;

        let link_key = (identity.user_id, identity.provider);
        let account_key = (identity.provider, identity.provider_account_id.clone());

        if state.by_link.contains_key(&link_key) {
            return Err(StoreError::Conflict(UniqueKey::UserProvider));
        }
        if state.by_account.contains_key(&account_key) {
            return Err(StoreError::Conflict(UniqueKey::ProviderAccount));
        }

        state.by_account.insert(account_key, identity.user_id);
        state.by_link.insert(link_key, identity.clone());
        Ok(identity)
    }

    async fn find(&self, user_id: &UserId, provider: OAuthProvider) -> StoreResult<Option<OAuthIdentity>> {
        Ok(self.oauth.read().await.by_link.get(&(*user_id, provider)).cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> StoreResult<Vec<OAuthIdentity>> {
        let state = self.oauth.read().await;
        let mut identities: Vec<OAuthIdentity> = state
            .by_link
            .values()
            .filter(|identity| &identity.user_id == user_id)
            .cloned()
            .collect();
        identities.sort_by_key(|identity| identity.provider.as_str());
        Ok(identities)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        provider: OAuthProvider,
        identity: &ProviderIdentity,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<OAuthIdentity> {
        let mut state = self.oauth.write().await;

        let stored = state
            .by_link
            .get_mut(&(*user_id, provider))
            .filter(|stored| stored.provider_account_id == identity.provider_account_id)
            .ok_or(StoreError::NotFound)?;

        stored.email = identity.email.clone();
        stored.is_verified = identity.verified;
        stored.updated_at = updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, user_id: &UserId, provider: OAuthProvider) -> StoreResult<()> {
        let mut state = self.oauth.write().await;
        let removed = state
            .by_link
            .remove(&(*user_id, provider))
            .ok_or(StoreError::NotFound)?;
        state.by_account.remove(&(provider, removed.provider_account_id));
        Ok(())
    }

    async fn delete_all(&self, user_id: &UserId) -> StoreResult<u64> {
        let mut state = self.oauth.write().await;
        let keys: Vec<(UserId, OAuthProvider)> = state
            .by_link
            .keys()
            .filter(|(owner, _)| owner == user_id)
            .copied()
            .collect();

        for key in &keys {
            if let Some(removed) = state.by_link.remove(key) {
                state.by_account.remove(&(removed.provider, removed.provider_account_id));
            }
        }
        Ok(keys.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user() -> UserId {
        UserId::from_uuid(Uuid::new_v4()).unwrap()
    }

    fn credential(user_id: UserId, email: &str) -> LocalCredential {
        LocalCredential::new(user_id, email.to_string(), "hash".to_string(), Utc::now())
    }

    fn identity(user_id: UserId, provider: OAuthProvider, account: &str) -> OAuthIdentity {
        OAuthIdentity::link(
            user_id,
            provider,
            ProviderIdentity {
                provider_account_id: account.to_string(),
                email: "p@x.com".to_string(),
                verified: true,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_local_insert_enforces_both_keys() {
        let store = InMemoryCredentialStore::new();
        let u1 = user();

        LocalCredentialStore::insert(&store, credential(u1, "a@x.com")).await.unwrap();

        let dup_user = LocalCredentialStore::insert(&store, credential(u1, "b@x.com")).await;
        assert!(matches!(dup_user, Err(StoreError::Conflict(UniqueKey::LocalUserId))));

        let dup_email = LocalCredentialStore::insert(&store, credential(user(), "a@x.com")).await;
        assert!(matches!(dup_email, Err(StoreError::Conflict(UniqueKey::LocalEmail))));

        assert_eq!(store.local_count().await, 1);
    }

    #[tokio::test]
    async fn test_update_email_releases_old_address() {
        let store = InMemoryCredentialStore::new();
        let u1 = user();
        LocalCredentialStore::insert(&store, credential(u1, "old@x.com")).await.unwrap();

        store.update_email(&u1, "new@x.com", Utc::now()).await.unwrap();

        assert!(store.find_by_email("old@x.com").await.unwrap().is_none());
        assert_eq!(store.find_by_email("new@x.com").await.unwrap().unwrap().user_id, u1);

        // 예전 주소는 다른 사용자가 사용할 수 있어야 함
        LocalCredentialStore::insert(&store, credential(user(), "old@x.com")).await.unwrap();
    }

    #[tokio::test]
    async fn test_oauth_insert_enforces_both_keys() {
        let store = InMemoryCredentialStore::new();
        let u1 = user();
        OAuthIdentityStore::insert(&store, identity(u1, OAuthProvider::Google, "g-1")).await.unwrap();

        let same_link = OAuthIdentityStore::insert(&store, identity(u1, OAuthProvider::Google, "g-2")).await;
        assert!(matches!(same_link, Err(StoreError::Conflict(UniqueKey::UserProvider))));

        let same_account =
            OAuthIdentityStore::insert(&store, identity(user(), OAuthProvider::Google, "g-1")).await;
        assert!(matches!(same_account, Err(StoreError::Conflict(UniqueKey::ProviderAccount))));

        // 같은 계정 ID라도 다른 프로바이더면 허용
        OAuthIdentityStore::insert(&store, identity(u1, OAuthProvider::GitHub, "g-1")).await.unwrap();
        assert_eq!(store.oauth_count().await, 2);
    }

    #[tokio::test]
    async fn test_delete_all_clears_account_index() {
        let store = InMemoryCredentialStore::new();
        let u1 = user();
        OAuthIdentityStore::insert(&store, identity(u1, OAuthProvider::Google, "g-1")).await.unwrap();
        OAuthIdentityStore::insert(&store, identity(u1, OAuthProvider::GitHub, "42")).await.unwrap();

        assert_eq!(store.delete_all(&u1).await.unwrap(), 2);
        assert_eq!(store.delete_all(&u1).await.unwrap(), 0);

        // 해제된 외부 계정은 다른 사용자에게 연동 가능
        OAuthIdentityStore::insert(&store, identity(user(), OAuthProvider::Google, "g-1")).await.unwrap();
    }
}
