//! # Domain Models
//!
//! 영속되지 않는 도메인 값 타입들입니다.
//! 프로바이더 클라이언트와의 교환에 쓰이는 [`provider::ProviderIdentity`],
//! [`provider::ProviderCredential`]을 포함합니다.

pub mod provider;
