//! # Domain Layer
//!
//! 신원 코어의 도메인 타입을 정의합니다.
//!
//! ```text
//! domain/
//! ├── entities/   ← 영속 레코드 (UserId, LocalCredential, OAuthIdentity)
//! ├── models/     ← 프로바이더 교환 값 (ProviderIdentity, ProviderCredential)
//! └── dto/        ← 입력 검증 (NewLocalCredentialInput, EmailInput)
//! ```

pub mod entities;
pub mod models;
pub mod dto;

pub use entities::{LocalCredential, OAuthIdentity, UserId};
pub use models::provider::{ProviderCredential, ProviderIdentity};
