//! # OAuth 신원 리포지토리 구현
//!
//! `oauth_identities` 컬렉션에 프로바이더 연동 레코드를 저장합니다.
//!
//! ## 인덱스
//!
//! | 이름 | 키 | 목적 |
//! |------|----|------|
//! | `user_provider_unique` | (user_id, provider) | 사용자당 프로바이더 1개 |
//! | `provider_account_unique` | (provider, provider_account_id) | 외부 계정 재사용 탈취 방지 |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::{Deserialize, Serialize};

use super::{classify, from_bson_datetime, parse_user_id, to_bson_datetime};
use crate::config::OAuthProvider;
use crate::db::Database;
use crate::domain::{OAuthIdentity, ProviderIdentity, UserId};
use crate::repositories::store::{OAuthIdentityStore, StoreError, StoreResult, UniqueKey};

const COLLECTION: &str = "oauth_identities";
const USER_PROVIDER_INDEX: &str = "user_provider_unique";
const PROVIDER_ACCOUNT_INDEX: &str = "provider_account_unique";
const INDEXES: &[(&str, UniqueKey)] = &[
    (USER_PROVIDER_INDEX, UniqueKey::UserProvider),
    (PROVIDER_ACCOUNT_INDEX, UniqueKey::ProviderAccount),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OAuthIdentityDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    user_id: String,
    provider: OAuthProvider,
    provider_account_id: String,
    email: String,
    is_verified: bool,
    created_at: mongodb::bson::DateTime,
    updated_at: mongodb::bson::DateTime,
}

impl From<&OAuthIdentity> for OAuthIdentityDocument {
    fn from(identity: &OAuthIdentity) -> Self {
        Self {
            id: None,
            user_id: identity.user_id.to_string(),
            provider: identity.provider,
            provider_account_id: identity.provider_account_id.clone(),
            email: identity.email.clone(),
            is_verified: identity.is_verified,
            created_at: to_bson_datetime(identity.created_at),
            updated_at: to_bson_datetime(identity.updated_at),
        }
    }
}

impl TryFrom<OAuthIdentityDocument> for OAuthIdentity {
    type Error = StoreError;

    fn try_from(document: OAuthIdentityDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: parse_user_id(&document.user_id)?,
            provider: document.provider,
            provider_account_id: document.provider_account_id,
            email: document.email,
            is_verified: document.is_verified,
            created_at: from_bson_datetime(document.created_at)?,
            updated_at: from_bson_datetime(document.updated_at)?,
        })
    }
}

/// MongoDB OAuth 신원 리포지토리
pub struct OAuthIdentityRepository {
    db: Arc<Database>,
}

impl OAuthIdentityRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<OAuthIdentityDocument> {
        self.db.get_database().collection(COLLECTION)
    }

    fn classify(err: mongodb::error::Error) -> StoreError {
        classify(err, INDEXES, UniqueKey::UserProvider)
    }

    /// 컬렉션 인덱스 생성
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let user_provider_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "provider": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(USER_PROVIDER_INDEX.to_string())
                .build())
            .build();

        let provider_account_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "provider_account_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(PROVIDER_ACCOUNT_INDEX.to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([user_provider_index, provider_account_index])
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl OAuthIdentityStore for OAuthIdentityRepository {
    async fn insert(&self, identity: OAuthIdentity) -> StoreResult<OAuthIdentity> {
        self.collection()
            .insert_one(OAuthIdentityDocument::from(&identity))
            .await
            .map_err(Self::classify)?;

        Ok(identity)
    }

    async fn find(&self, user_id: &UserId, provider: OAuthProvider) -> StoreResult<Option<OAuthIdentity>> {
        self.collection()
            .find_one(doc! { "user_id": user_id.to_string(), "provider": provider.as_str() })
            .await
            .map_err(Self::classify)?
            .map(OAuthIdentity::try_from)
            .transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> StoreResult<Vec<OAuthIdentity>> {
        let documents: Vec<OAuthIdentityDocument> = self.collection()
            .find(doc! { "user_id": user_id.to_string() })
            .sort(doc! { "provider": 1 })
            .await
            .map_err(Self::classify)?
            .try_collect()
            .await
            .map_err(Self::classify)?;

        documents.into_iter().map(OAuthIdentity::try_from).collect()
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        provider: OAuthProvider,
        identity: &ProviderIdentity,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<OAuthIdentity> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        // provider_account_id 조건으로 동시 재연동 레코드를 덮어쓰지 않음
        let updated = self.collection()
            .find_one_and_update(
                doc! {
                    "user_id": user_id.to_string(),
                    "provider": provider.as_str(),
                    "provider_account_id": identity.provider_account_id.as_str(),
                },
                doc! { "$set": {
                    "email": identity.email.as_str(),
                    "is_verified": identity.verified,
                    "updated_at": to_bson_datetime(updated_at),
                } },
            )
            .with_options(options)
            .await
            .map_err(Self::classify)?
            .ok_or(StoreError::NotFound)?;

        OAuthIdentity::try_from(updated)
    }

    async fn delete(&self, user_id: &UserId, provider: OAuthProvider) -> StoreResult<()> {
        let result = self.collection()
            .delete_one(doc! { "user_id": user_id.to_string(), "provider": provider.as_str() })
            .await
            .map_err(Self::classify)?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_all(&self, user_id: &UserId) -> StoreResult<u64> {
        let result = self.collection()
            .delete_many(doc! { "user_id": user_id.to_string() })
            .await
            .map_err(Self::classify)?;

        Ok(result.deleted_count)
    }
}
