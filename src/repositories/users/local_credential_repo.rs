//! # 로컬 자격 증명 리포지토리 구현
//!
//! `local_credentials` 컬렉션에 로컬 계정을 저장합니다.
//!
//! ## 인덱스
//!
//! - `_id`: 사용자 ID 문자열 (사용자당 1개 보장)
//! - `email_unique`: 이메일 유니크 인덱스
//!
//! 두 제약 모두 서버에서 원자적으로 강제되므로 동시 생성 경쟁에서도
//! 정확히 하나의 쓰기만 성공합니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::{Deserialize, Serialize};

use super::{classify, from_bson_datetime, parse_user_id, to_bson_datetime};
use crate::db::Database;
use crate::domain::{LocalCredential, UserId};
use crate::repositories::store::{LocalCredentialStore, StoreError, StoreResult, UniqueKey};

const COLLECTION: &str = "local_credentials";
const EMAIL_INDEX: &str = "email_unique";
const INDEXES: &[(&str, UniqueKey)] = &[(EMAIL_INDEX, UniqueKey::LocalEmail)];

/// 저장 문서 형태 (해시를 포함하므로 Debug 미구현)
#[derive(Clone, Serialize, Deserialize)]
struct LocalCredentialDocument {
    #[serde(rename = "_id")]
    user_id: String,
    email: String,
    password_hash: String,
    email_verified: bool,
    created_at: mongodb::bson::DateTime,
    updated_at: mongodb::bson::DateTime,
}

impl From<&LocalCredential> for LocalCredentialDocument {
    fn from(credential: &LocalCredential) -> Self {
        Self {
            user_id: credential.user_id.to_string(),
            email: credential.email.clone(),
            password_hash: credential.password_hash.clone(),
            email_verified: credential.email_verified,
            created_at: to_bson_datetime(credential.created_at),
            updated_at: to_bson_datetime(credential.updated_at),
        }
    }
}

impl TryFrom<LocalCredentialDocument> for LocalCredential {
    type Error = StoreError;

    fn try_from(document: LocalCredentialDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: parse_user_id(&document.user_id)?,
            email: document.email,
            password_hash: document.password_hash,
            email_verified: document.email_verified,
            created_at: from_bson_datetime(document.created_at)?,
            updated_at: from_bson_datetime(document.updated_at)?,
        })
    }
}

/// MongoDB 로컬 자격 증명 리포지토리
pub struct LocalCredentialRepository {
    db: Arc<Database>,
}

impl LocalCredentialRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<LocalCredentialDocument> {
        self.db.get_database().collection(COLLECTION)
    }

    fn classify(err: mongodb::error::Error) -> StoreError {
        classify(err, INDEXES, UniqueKey::LocalUserId)
    }

    fn after_update() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }

    /// 컬렉션 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    /// 이미 중복 데이터가 있는 경우 유니크 인덱스 생성은 실패합니다.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(EMAIL_INDEX.to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index])
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl LocalCredentialStore for LocalCredentialRepository {
    async fn insert(&self, credential: LocalCredential) -> StoreResult<LocalCredential> {
        self.collection()
            .insert_one(LocalCredentialDocument::from(&credential))
            .await
            .map_err(Self::classify)?;

        Ok(credential)
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> StoreResult<Option<LocalCredential>> {
        self.collection()
            .find_one(doc! { "_id": user_id.to_string() })
            .await
            .map_err(Self::classify)?
            .map(LocalCredential::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<LocalCredential>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(Self::classify)?
            .map(LocalCredential::try_from)
            .transpose()
    }

    async fn update_email(
        &self,
        user_id: &UserId,
        email: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<LocalCredential> {
        let updated = self.collection()
            .find_one_and_update(
                doc! { "_id": user_id.to_string() },
                doc! { "$set": {
                    "email": email,
                    "email_verified": false,
                    "updated_at": to_bson_datetime(updated_at),
                } },
            )
            .with_options(Self::after_update())
            .await
            .map_err(Self::classify)?
            .ok_or(StoreError::NotFound)?;

        LocalCredential::try_from(updated)
    }

    async fn set_email_verified(
        &self,
        user_id: &UserId,
        verified: bool,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<LocalCredential> {
        // 값이 실제로 바뀔 때만 updated_at을 갱신
        let updated = self.collection()
            .find_one_and_update(
                doc! { "_id": user_id.to_string(), "email_verified": { "$ne": verified } },
                doc! { "$set": {
                    "email_verified": verified,
                    "updated_at": to_bson_datetime(updated_at),
                } },
            )
            .with_options(Self::after_update())
            .await
            .map_err(Self::classify)?;

        match updated {
            Some(document) => LocalCredential::try_from(document),
            None => self.find_by_user_id(user_id).await?.ok_or(StoreError::NotFound),
        }
    }

    async fn delete(&self, user_id: &UserId) -> StoreResult<()> {
        let result = self.collection()
            .delete_one(doc! { "_id": user_id.to_string() })
            .await
            .map_err(Self::classify)?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
