//! # Core Module
//!
//! 로컬/OAuth 계정 관리자를 묶는 [`IdentityCore`] 퍼사드를 제공합니다.
//!
//! 전역 싱글톤이나 서비스 레지스트리는 없으며, 모든 협력자는
//! [`IdentityCore::from_collaborators`]로 명시적으로 주입됩니다.
//!
//! ```rust,ignore
//! let core = IdentityCore::from_collaborators(local_store, oauth_store, hasher, provider_client);
//! core.delete_auth_user("6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b").await?;
//! ```

pub mod identity_core;

pub use identity_core::IdentityCore;
