//! # Google OAuth 2.0 클라이언트
//!
//! Authorization Code를 토큰으로 교환하고 UserInfo API로 계정 정보를 조회합니다.
//!
//! ```text
//! POST {token_uri}     code, client_id, client_secret, redirect_uri, grant_type
//!   → { "access_token": "..." }
//! GET  {userinfo_uri}  Authorization: Bearer ACCESS_TOKEN
//!   → { "id": "1234567890", "email": "user@gmail.com", "verified_email": true }
//! ```

use serde::Deserialize;

use crate::config::{GoogleOAuthConfig, OAuthProvider};
use crate::domain::ProviderIdentity;
use crate::services::auth::provider_client::ProviderError;
use crate::utils::string_utils::normalize_email;

const PROVIDER: OAuthProvider = OAuthProvider::Google;

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

/// UserInfo 응답 중 계정 연동에 필요한 필드
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: String,
    #[serde(default)]
    verified_email: bool,
}

impl GoogleUserInfo {
    fn into_identity(self) -> Result<ProviderIdentity, ProviderError> {
        if self.id.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ProviderError::Malformed {
                provider: PROVIDER,
                message: "userinfo is missing id or email".to_string(),
            });
        }

        Ok(ProviderIdentity {
            provider_account_id: self.id,
            email: normalize_email(&self.email),
            verified: self.verified_email,
        })
    }
}

/// Google OAuth 클라이언트
#[derive(Debug, Clone)]
pub struct GoogleOAuthClient {
    config: GoogleOAuthConfig,
    http: reqwest::Client,
}

impl GoogleOAuthClient {
    pub fn new(config: GoogleOAuthConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// authorization code를 access token으로 교환한 뒤 계정 정보를 조회합니다.
    pub async fn exchange_code(&self, code: &str) -> Result<ProviderIdentity, ProviderError> {
        log::debug!("Google 토큰 교환 요청");

        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self.http
            .post(&self.config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, "token", e))?;

        if !response.status().is_success() {
            return Err(ProviderError::from_status(PROVIDER, response.status(), "token"));
        }

        let token = response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, "token", e))?;

        self.fetch_identity(&token.access_token).await
    }

    /// access token으로 UserInfo를 조회합니다.
    pub async fn fetch_identity(&self, access_token: &str) -> Result<ProviderIdentity, ProviderError> {
        let response = self.http
            .get(&self.config.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, "userinfo", e))?;

        if !response.status().is_success() {
            return Err(ProviderError::from_status(PROVIDER, response.status(), "userinfo"));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, "userinfo", e))?
            .into_identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_userinfo_maps_to_identity() {
        let info: GoogleUserInfo = serde_json::from_str(
            r#"{"id":"1234567890","email":"User@Gmail.com","verified_email":true,"name":"John"}"#,
        )
        .unwrap();

        let identity = info.into_identity().unwrap();
        assert_eq!(identity.provider_account_id, "1234567890");
        assert_eq!(identity.email, "user@gmail.com");
        assert!(identity.verified);
    }

    #[test]
    fn test_missing_verified_flag_defaults_false() {
        let info: GoogleUserInfo =
            serde_json::from_str(r#"{"id":"42","email":"a@example.com"}"#).unwrap();
        assert!(!info.into_identity().unwrap().verified);
    }

    #[test]
    fn test_blank_id_is_malformed() {
        let info: GoogleUserInfo =
            serde_json::from_str(r#"{"id":" ","email":"a@example.com"}"#).unwrap();
        assert!(matches!(info.into_identity(), Err(ProviderError::Malformed { .. })));
    }
}
