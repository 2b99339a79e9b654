//! 설정된 프로바이더 클라이언트로 요청을 분배하는 [`ProviderClient`] 구현

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{GitHubOAuthConfig, GoogleOAuthConfig, OAuthProvider, ProviderHttpConfig};
use crate::domain::ProviderIdentity;
use crate::errors::errors::{AppResult, ErrorContext};
use crate::services::auth::github_client::GitHubOAuthClient;
use crate::services::auth::google_client::GoogleOAuthClient;
use crate::services::auth::provider_client::{ProviderClient, ProviderError};

/// HTTP 기반 프로바이더 클라이언트
///
/// 설정이 없는 프로바이더에 대한 요청은 [`ProviderError::NotConfigured`]로 실패합니다.
/// 모든 요청은 공유 `reqwest::Client`의 타임아웃을 따릅니다.
#[derive(Debug, Clone, Default)]
pub struct HttpProviderClient {
    google: Option<GoogleOAuthClient>,
    github: Option<GitHubOAuthClient>,
}

impl HttpProviderClient {
    pub fn new(google: Option<GoogleOAuthClient>, github: Option<GitHubOAuthClient>) -> Self {
        Self { google, github }
    }

    /// 환경 변수 설정으로 클라이언트를 구성합니다.
    pub fn from_env() -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(ProviderHttpConfig::timeout_secs()))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        let google = GoogleOAuthConfig::from_env().map(|config| GoogleOAuthClient::new(config, http.clone()));
        let github = GitHubOAuthConfig::from_env().map(|config| GitHubOAuthClient::new(config, http));

        Ok(Self::new(google, github))
    }

    /// 설정된 프로바이더 목록
    pub fn enabled_providers(&self) -> Vec<OAuthProvider> {
        OAuthProvider::ALL
            .into_iter()
            .filter(|provider| match provider {
                OAuthProvider::Google => self.google.is_some(),
                OAuthProvider::GitHub => self.github.is_some(),
            })
            .collect()
    }

    fn google(&self) -> Result<&GoogleOAuthClient, ProviderError> {
        self.google.as_ref().ok_or(ProviderError::NotConfigured(OAuthProvider::Google))
    }

    fn github(&self) -> Result<&GitHubOAuthClient, ProviderError> {
        self.github.as_ref().ok_or(ProviderError::NotConfigured(OAuthProvider::GitHub))
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn exchange_code(
        &self,
        provider: OAuthProvider,
        code: &str,
    ) -> Result<ProviderIdentity, ProviderError> {
        match provider {
            OAuthProvider::Google => self.google()?.exchange_code(code).await,
            OAuthProvider::GitHub => self.github()?.exchange_code(code).await,
        }
    }

    async fn exchange_token(
        &self,
        provider: OAuthProvider,
        access_token: &str,
    ) -> Result<ProviderIdentity, ProviderError> {
        match provider {
            OAuthProvider::Google => self.google()?.fetch_identity(access_token).await,
            OAuthProvider::GitHub => self.github()?.fetch_identity(access_token).await,
        }
    }
}
