//! 계정 신원 코어 (Identity-Account Core)
//!
//! 사용자별 로컬 자격 증명(이메일/비밀번호)과 OAuth 프로바이더 연동을 관리하는
//! 라이브러리입니다. HTTP 계층은 없으며, 상위 서비스가 [`core::IdentityCore`]를
//! 생성자 주입으로 구성해 사용합니다.
//!
//! # Features
//!
//! - **로컬 계정**: 생성, 이메일 변경, 검증 상태 관리, 삭제, 비밀번호 검증
//! - **OAuth 연동**: Google / GitHub 계정 연동, 동기화, 해제
//! - **원자적 유일성**: MongoDB 유니크 인덱스 또는 단일 락 메모리 저장소
//! - **안정적인 에러 분류**: InvalidInput / Unauthorized / Conflict / NotFound / Unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  IdentityCore   │ ← 사용자 ID 파싱 후 위임
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 로컬 / OAuth 계정 관리자
//! └─────────────────┘
//!     │          │
//!     ▼          ▼
//! ┌────────┐ ┌──────────────────┐
//! │ Stores │ │ Hasher, Provider │ ← 주입되는 협력자
//! └────────┘ └──────────────────┘
//!     │
//!     ▼
//! ┌─────────────────┐
//! │ MongoDB / 메모리 │
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use auth_identity_core::core::IdentityCore;
//! use auth_identity_core::repositories::memory::InMemoryCredentialStore;
//! use auth_identity_core::services::auth::{BcryptPasswordHasher, HttpProviderClient};
//!
//! let store = Arc::new(InMemoryCredentialStore::new());
//! let core = IdentityCore::from_collaborators(
//!     store.clone(),
//!     store,
//!     Arc::new(BcryptPasswordHasher::from_config()?),
//!     Arc::new(HttpProviderClient::from_env()?),
//! );
//!
//! let credential = core
//!     .create_local_auth_user("6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b", "john@example.com", "SecurePass123")
//!     .await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod errors;
