//! # Authentication Configuration Module
//!
//! OAuth 프로바이더 목록과 프로바이더별 클라이언트 설정을 관리하는 모듈입니다.
//!
//! ## 환경 변수
//!
//! ### Google OAuth 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/auth/google/callback"
//! ```
//!
//! ### GitHub OAuth 설정
//! ```bash
//! export GITHUB_CLIENT_ID="your-github-client-id"
//! export GITHUB_CLIENT_SECRET="your-github-client-secret"
//! export GITHUB_REDIRECT_URI="http://localhost:8080/auth/github/callback"
//! ```
//!
//! `*_CLIENT_ID`가 설정되지 않은 프로바이더는 비활성화됩니다.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::errors::AppError;

/// OAuth 프로바이더 (닫힌 열거형)
///
/// 동기화 알고리즘은 프로바이더와 무관하게 동일하며,
/// 프로바이더별 차이는 [`ProviderClient`](crate::services::auth::ProviderClient) 구현에서만 처리합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    GitHub,
}

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 2] = [OAuthProvider::Google, OAuthProvider::GitHub];

    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::GitHub => "github",
        }
    }
}

impl FromStr for OAuthProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::GitHub),
            _ => Err(AppError::InvalidInput(format!("Unsupported OAuth provider: {}", s))),
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Google OAuth 2.0 클라이언트 설정
///
/// `client_secret`은 절대 로그에 출력하지 마세요.
#[derive(Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
}

impl GoogleOAuthConfig {
    /// 환경 변수에서 설정을 읽습니다. `GOOGLE_CLIENT_ID`가 없으면 `None`입니다.
    pub fn from_env() -> Option<Self> {
        let client_id = non_empty_var("GOOGLE_CLIENT_ID")?;

        Some(Self {
            client_id,
            client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            redirect_uri: env::var("GOOGLE_REDIRECT_URI").unwrap_or_default(),
            token_uri: env::var("GOOGLE_TOKEN_URI")
                .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string()),
            userinfo_uri: env::var("GOOGLE_USERINFO_URI")
                .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string()),
        })
    }
}

impl fmt::Debug for GoogleOAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleOAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("token_uri", &self.token_uri)
            .field("userinfo_uri", &self.userinfo_uri)
            .finish()
    }
}

/// GitHub OAuth 클라이언트 설정
#[derive(Clone)]
pub struct GitHubOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub token_uri: String,
    pub api_uri: String,
}

impl GitHubOAuthConfig {
    /// 환경 변수에서 설정을 읽습니다. `GITHUB_CLIENT_ID`가 없으면 `None`입니다.
    pub fn from_env() -> Option<Self> {
        let client_id = non_empty_var("GITHUB_CLIENT_ID")?;

        Some(Self {
            client_id,
            client_secret: env::var("GITHUB_CLIENT_SECRET").unwrap_or_default(),
            redirect_uri: env::var("GITHUB_REDIRECT_URI").unwrap_or_default(),
            token_uri: env::var("GITHUB_TOKEN_URI")
                .unwrap_or_else(|_| "https://github.com/login/oauth/access_token".to_string()),
            api_uri: env::var("GITHUB_API_URI")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
        })
    }
}

impl fmt::Debug for GitHubOAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubOAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("token_uri", &self.token_uri)
            .field("api_uri", &self.api_uri)
            .finish()
    }
}

/// 프로바이더 HTTP 호출 설정
pub struct ProviderHttpConfig;

impl ProviderHttpConfig {
    /// 요청 타임아웃(초). 기본값 10초.
    pub fn timeout_secs() -> u64 {
        env::var("OAUTH_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }
}
