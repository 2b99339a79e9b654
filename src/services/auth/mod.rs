//! 인증 협력자 모듈
//!
//! 계정 관리자가 의존하는 외부 협력자 계약과 그 구현을 제공합니다.
//!
//! # Features
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - Google OAuth 2.0 코드/토큰 교환
//! - GitHub OAuth 코드/토큰 교환
//!
//! # Security
//!
//! - 평문 비밀번호, 해시, 토큰, 코드는 로그에 남기지 않음
//! - 클라이언트 시크릿은 Debug 출력에서 가림
//! - 프로바이더 요청은 설정된 타임아웃을 따르며 재시도하지 않음
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{HttpProviderClient, ProviderClient};
//! use crate::config::OAuthProvider;
//!
//! let client = HttpProviderClient::from_env()?;
//! let identity = client.exchange_code(OAuthProvider::Google, &code).await?;
//! ```

pub mod password_hasher;
pub mod provider_client;
pub mod google_client;
pub mod github_client;
pub mod http_provider_client;

#[cfg(test)]
pub(crate) mod fake_provider;

pub use password_hasher::{BcryptPasswordHasher, PasswordHasher};
pub use provider_client::{ProviderClient, ProviderError};
pub use google_client::GoogleOAuthClient;
pub use github_client::GitHubOAuthClient;
pub use http_provider_client::HttpProviderClient;
