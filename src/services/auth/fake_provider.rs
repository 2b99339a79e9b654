//! 테스트용 스크립트 프로바이더 클라이언트

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::OAuthProvider;
use crate::domain::ProviderIdentity;
use crate::services::auth::provider_client::{ProviderClient, ProviderError};

/// 자격 증명 값별로 미리 정한 계정 정보를 돌려주는 클라이언트
///
/// 등록되지 않은 코드/토큰은 거부됩니다. `set_unavailable`로 장애를 흉내냅니다.
#[derive(Default)]
pub struct StaticProviderClient {
    identities: Mutex<HashMap<(OAuthProvider, String), ProviderIdentity>>,
    unavailable: Mutex<bool>,
    calls: Mutex<usize>,
}

impl StaticProviderClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 코드와 토큰 모두 같은 값으로 조회됩니다.
    pub fn register(&self, provider: OAuthProvider, credential: &str, account_id: &str, email: &str, verified: bool) {
        self.identities.lock().unwrap().insert(
            (provider, credential.to_string()),
            ProviderIdentity {
                provider_account_id: account_id.to_string(),
                email: email.to_string(),
                verified,
            },
        );
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn resolve(&self, provider: OAuthProvider, credential: &str) -> Result<ProviderIdentity, ProviderError> {
        *self.calls.lock().unwrap() += 1;

        if *self.unavailable.lock().unwrap() {
            return Err(ProviderError::Unavailable {
                provider,
                message: "scripted outage".to_string(),
                source: "connection refused".into(),
            });
        }

        self.identities
            .lock()
            .unwrap()
            .get(&(provider, credential.to_string()))
            .cloned()
            .ok_or(ProviderError::Rejected {
                provider,
                reason: "unknown credential".to_string(),
            })
    }
}

#[async_trait]
impl ProviderClient for StaticProviderClient {
    async fn exchange_code(&self, provider: OAuthProvider, code: &str) -> Result<ProviderIdentity, ProviderError> {
        self.resolve(provider, code)
    }

    async fn exchange_token(&self, provider: OAuthProvider, access_token: &str) -> Result<ProviderIdentity, ProviderError> {
        self.resolve(provider, access_token)
    }
}
