//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! Credential Store 계약([`store`])과 그 구현들을 제공합니다.
//!
//! - [`users`] - MongoDB 유니크 인덱스 기반 구현
//! - [`memory`] - 단일 락 기반 메모리 구현
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::{memory::InMemoryCredentialStore, LocalCredentialStore};
//!
//! let store = Arc::new(InMemoryCredentialStore::new());
//! let found = store.find_by_email("user@example.com").await?;
//! ```

pub mod store;
pub mod memory;
pub mod users;

pub use store::{LocalCredentialStore, OAuthIdentityStore, StoreError, StoreResult, UniqueKey};
