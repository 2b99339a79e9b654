//! # Identity Core
//!
//! 로컬 계정 관리자와 OAuth 계정 관리자를 하나의 타입으로 노출하는 퍼사드입니다.
//!
//! 호출자가 넘긴 문자열 사용자 ID를 파싱/검증한 뒤 해당 관리자에 위임합니다.
//! 퍼사드는 상태도 비즈니스 규칙도 갖지 않으며 관리자의 에러를 그대로 전달합니다.
//!
//! ```text
//!                  ┌──────────────────┐
//!   caller ──────► │   IdentityCore   │  UserId::parse → InvalidInput
//!                  └────────┬─────────┘
//!              ┌────────────┴────────────┐
//!              ▼                         ▼
//!     LocalUserService           OAuthUserService
//!      │           │              │             │
//!      ▼           ▼              ▼             ▼
//!  LocalCredential PasswordHasher OAuthIdentity ProviderClient
//!      Store                        Store
//! ```

use std::sync::Arc;

use crate::config::OAuthProvider;
use crate::domain::{LocalCredential, OAuthIdentity, UserId};
use crate::errors::errors::AppResult;
use crate::repositories::store::{LocalCredentialStore, OAuthIdentityStore};
use crate::services::auth::{PasswordHasher, ProviderClient};
use crate::services::users::{LocalUserService, OAuthUserService};

/// 계정 신원 코어
pub struct IdentityCore {
    local: LocalUserService,
    oauth: OAuthUserService,
}

impl IdentityCore {
    pub fn new(local: LocalUserService, oauth: OAuthUserService) -> Self {
        Self { local, oauth }
    }

    /// 네 협력자로부터 두 관리자를 구성합니다.
    pub fn from_collaborators(
        local_store: Arc<dyn LocalCredentialStore>,
        oauth_store: Arc<dyn OAuthIdentityStore>,
        hasher: Arc<dyn PasswordHasher>,
        provider_client: Arc<dyn ProviderClient>,
    ) -> Self {
        Self::new(
            LocalUserService::new(local_store, hasher),
            OAuthUserService::new(oauth_store, provider_client),
        )
    }

    // ---- 로컬 계정 ----

    pub async fn create_local_auth_user(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
    ) -> AppResult<LocalCredential> {
        self.local.create_local_auth_user(UserId::parse(user_id)?, email, password).await
    }

    pub async fn update_local_email_verification_status(
        &self,
        user_id: &str,
        verified: bool,
    ) -> AppResult<LocalCredential> {
        self.local
            .update_local_email_verification_status(UserId::parse(user_id)?, verified)
            .await
    }

    pub async fn update_auth_user_email(&self, user_id: &str, new_email: &str) -> AppResult<LocalCredential> {
        self.local.update_auth_user_email(UserId::parse(user_id)?, new_email).await
    }

    pub async fn delete_auth_user(&self, user_id: &str) -> AppResult<()> {
        self.local.delete_auth_user(UserId::parse(user_id)?).await
    }

    pub async fn get_local_auth_user(&self, user_id: &str) -> AppResult<LocalCredential> {
        self.local.get_local_auth_user(UserId::parse(user_id)?).await
    }

    /// 이메일/비밀번호 로그인 검증 (사용자 ID 불필요)
    pub async fn verify_local_password(&self, email: &str, password: &str) -> AppResult<LocalCredential> {
        self.local.verify_local_password(email, password).await
    }

    // ---- OAuth 계정 ----

    pub async fn create_oauth_user(
        &self,
        user_id: &str,
        provider: OAuthProvider,
        access_token: Option<&str>,
        code: Option<&str>,
    ) -> AppResult<OAuthIdentity> {
        self.oauth
            .create_oauth_user(UserId::parse(user_id)?, provider, access_token, code)
            .await
    }

    pub async fn sync_oauth_user(
        &self,
        user_id: &str,
        provider: OAuthProvider,
        access_token: Option<&str>,
        code: Option<&str>,
    ) -> AppResult<OAuthIdentity> {
        self.oauth
            .sync_oauth_user(UserId::parse(user_id)?, provider, access_token, code)
            .await
    }

    pub async fn delete_oauth_user(&self, user_id: &str, provider: OAuthProvider) -> AppResult<()> {
        self.oauth.delete_oauth_user(UserId::parse(user_id)?, provider).await
    }

    pub async fn delete_all_oauth_users(&self, user_id: &str) -> AppResult<u64> {
        self.oauth.delete_all_oauth_users(UserId::parse(user_id)?).await
    }

    pub async fn get_oauth_user(&self, user_id: &str, provider: OAuthProvider) -> AppResult<OAuthIdentity> {
        self.oauth.get_oauth_user(UserId::parse(user_id)?, provider).await
    }

    pub async fn list_oauth_users(&self, user_id: &str) -> AppResult<Vec<OAuthIdentity>> {
        self.oauth.list_oauth_users(UserId::parse(user_id)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::errors::ErrorKind;
    use crate::repositories::memory::InMemoryCredentialStore;
    use crate::services::auth::fake_provider::StaticProviderClient;
    use crate::services::auth::BcryptPasswordHasher;

    const USER: &str = "6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b";

    fn core() -> (IdentityCore, Arc<InMemoryCredentialStore>) {
        let store = Arc::new(InMemoryCredentialStore::new());
        let provider = Arc::new(StaticProviderClient::new());
        provider.register(OAuthProvider::GitHub, "gho_token", "583231", "octo@github.com", true);

        let core = IdentityCore::from_collaborators(
            store.clone(),
            store.clone(),
            Arc::new(BcryptPasswordHasher::new(4).unwrap()),
            provider,
        );
        (core, store)
    }

    #[tokio::test]
    async fn test_malformed_user_id_is_rejected_before_dispatch() {
        let (core, store) = core();

        for bad in ["", "not-a-uuid", "00000000-0000-0000-0000-000000000000"] {
            let err = core.create_local_auth_user(bad, "a@example.com", "SecurePass123").await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);

            let err = core.create_oauth_user(bad, OAuthProvider::GitHub, Some("gho_token"), None).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }

        assert_eq!(store.local_count().await, 0);
        assert_eq!(store.oauth_count().await, 0);
    }

    #[tokio::test]
    async fn test_local_and_oauth_lifecycle_through_facade() {
        let (core, _) = core();

        let local = core.create_local_auth_user(USER, "me@example.com", "SecurePass123").await.unwrap();
        assert_eq!(local.user_id.to_string(), USER);
        assert!(core.update_local_email_verification_status(USER, true).await.unwrap().email_verified);
        assert_eq!(core.verify_local_password("me@example.com", "SecurePass123").await.unwrap().user_id, local.user_id);

        let linked = core.create_oauth_user(USER, OAuthProvider::GitHub, Some("gho_token"), None).await.unwrap();
        assert_eq!(core.get_oauth_user(USER, OAuthProvider::GitHub).await.unwrap(), linked);
        assert_eq!(core.sync_oauth_user(USER, OAuthProvider::GitHub, Some("gho_token"), None).await.unwrap().email, linked.email);

        core.delete_oauth_user(USER, OAuthProvider::GitHub).await.unwrap();
        core.delete_auth_user(USER).await.unwrap();
        assert_eq!(core.delete_auth_user(USER).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(core.delete_all_oauth_users(USER).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_uppercase_user_id_is_accepted() {
        let (core, _) = core();

        core.create_local_auth_user(&USER.to_uppercase(), "up@example.com", "SecurePass123").await.unwrap();
        assert_eq!(core.get_local_auth_user(USER).await.unwrap().email, "up@example.com");
    }
}
