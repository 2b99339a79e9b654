//! MongoDB 기반 자격 증명 리포지토리
//!
//! 유일성은 컬렉션의 유니크 인덱스로 강제합니다. 서버의 중복 키 에러(11000)는
//! 위반된 인덱스 이름에 따라 [`StoreError::Conflict`]로 변환됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let local_repo = LocalCredentialRepository::new(database.clone());
//! local_repo.ensure_indexes().await?;
//! ```

pub mod local_credential_repo;
pub mod oauth_identity_repo;

pub use local_credential_repo::LocalCredentialRepository;
pub use oauth_identity_repo::OAuthIdentityRepository;

use chrono::{DateTime, Utc};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use crate::domain::UserId;
use crate::repositories::store::{StoreError, UniqueKey};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// 중복 키 에러면 서버 메시지를 반환합니다.
fn duplicate_key_message(err: &MongoError) -> Option<&str> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            Some(write_error.message.as_str())
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            Some(command_error.message.as_str())
        }
        _ => None,
    }
}

/// 중복 키 메시지에서 위반된 인덱스 이름을 추출합니다.
///
/// 서버 메시지 형식: `E11000 duplicate key error collection: db.coll index: <name> dup key: { ... }`
fn violated_index(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("index: ")?;
    rest.split_whitespace().next()
}

/// 위반된 인덱스 이름을 유일성 키로 변환합니다.
///
/// `indexes`는 (인덱스 이름, 유일성 키) 목록입니다. 이름이 정확히 일치하는 항목이 없으면
/// (`_id_` 포함) `fallback`을 사용합니다.
pub(crate) fn conflict_key(message: &str, indexes: &[(&str, UniqueKey)], fallback: UniqueKey) -> UniqueKey {
    violated_index(message)
        .and_then(|name| indexes.iter().find(|(index, _)| *index == name))
        .map(|(_, key)| *key)
        .unwrap_or(fallback)
}

/// 드라이버 에러를 저장소 에러로 분류합니다.
///
/// - 중복 키 → `Conflict`
/// - 저장 문서를 해석할 수 없음 → `Corrupt` (재시도해도 해결되지 않음)
/// - 그 외 → `Unavailable`
pub(crate) fn classify(err: MongoError, indexes: &[(&str, UniqueKey)], fallback: UniqueKey) -> StoreError {
    if let Some(message) = duplicate_key_message(&err) {
        return StoreError::Conflict(conflict_key(message, indexes, fallback));
    }
    if let ErrorKind::BsonDeserialization(de_error) = err.kind.as_ref() {
        return StoreError::Corrupt(de_error.to_string());
    }
    StoreError::Unavailable(err.to_string())
}

pub(crate) fn to_bson_datetime(value: DateTime<Utc>) -> mongodb::bson::DateTime {
    mongodb::bson::DateTime::from_millis(value.timestamp_millis())
}

pub(crate) fn from_bson_datetime(value: mongodb::bson::DateTime) -> Result<DateTime<Utc>, StoreError> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| StoreError::Corrupt(format!("timestamp out of range: {}", value)))
}

pub(crate) fn parse_user_id(value: &str) -> Result<UserId, StoreError> {
    UserId::parse(value).map_err(|_| StoreError::Corrupt(format!("invalid user id: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCAL_INDEXES: &[(&str, UniqueKey)] = &[("email_unique", UniqueKey::LocalEmail)];
    const OAUTH_INDEXES: &[(&str, UniqueKey)] = &[
        ("user_provider_unique", UniqueKey::UserProvider),
        ("provider_account_unique", UniqueKey::ProviderAccount),
    ];

    #[test]
    fn test_conflict_key_from_server_messages() {
        let email = r#"E11000 duplicate key error collection: auth_identity_dev.local_credentials index: email_unique dup key: { email: "a@example.com" }"#;
        let id = r#"E11000 duplicate key error collection: auth_identity_dev.local_credentials index: _id_ dup key: { _id: "6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b" }"#;
        let account = r#"E11000 duplicate key error collection: auth_identity_dev.oauth_identities index: provider_account_unique dup key: { provider: "google", provider_account_id: "g-100" }"#;
        let link = r#"E11000 duplicate key error collection: auth_identity_dev.oauth_identities index: user_provider_unique dup key: { user_id: "6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b", provider: "google" }"#;

        assert_eq!(conflict_key(email, LOCAL_INDEXES, UniqueKey::LocalUserId), UniqueKey::LocalEmail);
        assert_eq!(conflict_key(id, LOCAL_INDEXES, UniqueKey::LocalUserId), UniqueKey::LocalUserId);
        assert_eq!(conflict_key(account, OAUTH_INDEXES, UniqueKey::UserProvider), UniqueKey::ProviderAccount);
        assert_eq!(conflict_key(link, OAUTH_INDEXES, UniqueKey::UserProvider), UniqueKey::UserProvider);
    }

    #[test]
    fn test_conflict_key_ignores_index_names_inside_values() {
        let message = r#"E11000 duplicate key error collection: auth_identity_dev.local_credentials index: _id_ dup key: { _id: "x", email: "email_unique@example.com" }"#;
        assert_eq!(conflict_key(message, LOCAL_INDEXES, UniqueKey::LocalUserId), UniqueKey::LocalUserId);
        assert_eq!(conflict_key("no index here", LOCAL_INDEXES, UniqueKey::LocalUserId), UniqueKey::LocalUserId);
    }

    #[test]
    fn test_undecodable_document_is_corrupt() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct StoredProvider {
            provider: crate::config::OAuthProvider,
        }

        let de_error = mongodb::bson::from_document::<StoredProvider>(mongodb::bson::doc! { "provider": "myspace" })
            .unwrap_err();
        let err = classify(MongoError::from(de_error), OAUTH_INDEXES, UniqueKey::UserProvider);

        assert!(matches!(err, StoreError::Corrupt(_)));
        assert_eq!(crate::errors::AppError::from(err).kind(), crate::errors::ErrorKind::Internal);
    }

    #[test]
    fn test_transport_error_is_unavailable() {
        let io_error = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = classify(MongoError::from(io_error), LOCAL_INDEXES, UniqueKey::LocalUserId);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_bson_datetime_conversion_keeps_millis() {
        let now = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(from_bson_datetime(to_bson_datetime(now)).unwrap(), now);
    }

    #[test]
    fn test_new_record_times_survive_storage() {
        let precise = DateTime::<Utc>::from_timestamp(1_700_000_000, 123_456_789).unwrap();
        let user_id = parse_user_id("6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b").unwrap();
        let credential = crate::domain::LocalCredential::new(user_id, "a@x.com".into(), "hash".into(), precise);

        assert_eq!(from_bson_datetime(to_bson_datetime(credential.created_at)).unwrap(), credential.created_at);
    }

    #[test]
    fn test_parse_user_id_marks_corrupt() {
        assert!(matches!(parse_user_id("not-a-uuid"), Err(StoreError::Corrupt(_))));
        assert!(parse_user_id("6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b").is_ok());
    }
}
