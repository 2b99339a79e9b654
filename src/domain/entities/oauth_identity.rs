//! OAuth Identity Entity
//!
//! 외부 프로바이더 계정에서 파생된 신원 레코드입니다.
//! (user_id, provider) 와 (provider, provider_account_id) 가 각각 유일합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user_id::UserId;
use crate::config::OAuthProvider;
use crate::domain::models::provider::ProviderIdentity;
use crate::utils::time_utils::truncate_to_millis;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthIdentity {
    pub user_id: UserId,
    pub provider: OAuthProvider,
    /// 프로바이더 측 계정 ID (생성 후 불변)
    pub provider_account_id: String,
    /// 프로바이더가 알려준 이메일 (정보용, 유일성 제약 없음)
    pub email: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OAuthIdentity {
    /// 프로바이더 교환 결과로부터 새 연동 레코드를 만듭니다.
    pub fn link(
        user_id: UserId,
        provider: OAuthProvider,
        identity: ProviderIdentity,
        now: DateTime<Utc>,
    ) -> Self {
        let now = truncate_to_millis(now);
        Self {
            user_id,
            provider,
            provider_account_id: identity.provider_account_id,
            email: identity.email,
            is_verified: identity.verified,
            created_at: now,
            updated_at: now,
        }
    }
}
