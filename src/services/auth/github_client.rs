//! # GitHub OAuth 클라이언트
//!
//! GitHub은 토큰 교환 실패를 200 응답 본문의 `error` 필드로 알려주므로
//! 상태 코드와 본문을 모두 확인합니다.
//!
//! 계정 식별자는 변경될 수 있는 `login`이 아니라 숫자 `id`를 사용하고,
//! 이메일은 `/user/emails`의 primary 주소와 그 검증 여부를 사용합니다.

use serde::Deserialize;

use crate::config::{GitHubOAuthConfig, OAuthProvider};
use crate::domain::ProviderIdentity;
use crate::services::auth::provider_client::ProviderError;
use crate::utils::string_utils::normalize_email;

const PROVIDER: OAuthProvider = OAuthProvider::GitHub;
const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Deserialize)]
struct GitHubTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorResponse {
    error: String,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// `/user`와 `/user/emails` 응답으로 계정 정보를 구성합니다.
///
/// primary 주소가 없으면 공개 이메일을 미검증으로 사용합니다.
fn build_identity(user: GitHubUser, emails: Vec<GitHubEmail>) -> Result<ProviderIdentity, ProviderError> {
    let (email, verified) = match emails.into_iter().find(|e| e.primary) {
        Some(primary) => (primary.email, primary.verified),
        None => match user.email {
            Some(public) if !public.trim().is_empty() => (public, false),
            _ => {
                return Err(ProviderError::Malformed {
                    provider: PROVIDER,
                    message: "account has no usable email".to_string(),
                })
            }
        },
    };

    Ok(ProviderIdentity {
        provider_account_id: user.id.to_string(),
        email: normalize_email(&email),
        verified,
    })
}

/// 토큰 응답 본문을 해석합니다. `error` 필드가 있으면 거부로 분류합니다.
fn parse_token_body(body: &str) -> Result<String, ProviderError> {
    if let Ok(error_response) = serde_json::from_str::<GitHubErrorResponse>(body) {
        if !error_response.error.is_empty() {
            return Err(ProviderError::Rejected {
                provider: PROVIDER,
                reason: error_response.error_description.unwrap_or(error_response.error),
            });
        }
    }

    serde_json::from_str::<GitHubTokenResponse>(body)
        .map(|token| token.access_token)
        .map_err(|e| ProviderError::Malformed {
            provider: PROVIDER,
            message: format!("token response: {}", e),
        })
}

/// GitHub OAuth 클라이언트
#[derive(Debug, Clone)]
pub struct GitHubOAuthClient {
    config: GitHubOAuthConfig,
    http: reqwest::Client,
}

impl GitHubOAuthClient {
    pub fn new(config: GitHubOAuthConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub async fn exchange_code(&self, code: &str) -> Result<ProviderIdentity, ProviderError> {
        log::debug!("GitHub 토큰 교환 요청");

        let response = self.http
            .post(&self.config.token_uri)
            .header("Accept", "application/json")
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, "token", e))?;

        if !response.status().is_success() {
            return Err(ProviderError::from_status(PROVIDER, response.status(), "token"));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, "token", e))?;
        let access_token = parse_token_body(&body)?;

        self.fetch_identity(&access_token).await
    }

    pub async fn fetch_identity(&self, access_token: &str) -> Result<ProviderIdentity, ProviderError> {
        let user: GitHubUser = self.get_json("user", access_token).await?;
        let emails: Vec<GitHubEmail> = self.get_json("user/emails", access_token).await?;

        build_identity(user, emails)
    }

    async fn get_json<T>(&self, path: &str, access_token: &str) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.config.api_uri.trim_end_matches('/'), path);

        let response = self.http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, path, e))?;

        if !response.status().is_success() {
            return Err(ProviderError::from_status(PROVIDER, response.status(), path));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emails(json: &str) -> Vec<GitHubEmail> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_primary_email_wins() {
        let user = GitHubUser { id: 583231, email: Some("public@example.com".to_string()) };
        let identity = build_identity(
            user,
            emails(
                r#"[{"email":"other@example.com","primary":false,"verified":true},
                    {"email":"Octo@GitHub.com","primary":true,"verified":true,"visibility":"private"}]"#,
            ),
        )
        .unwrap();

        assert_eq!(identity.provider_account_id, "583231");
        assert_eq!(identity.email, "octo@github.com");
        assert!(identity.verified);
    }

    #[test]
    fn test_falls_back_to_public_email_unverified() {
        let user = GitHubUser { id: 7, email: Some("public@example.com".to_string()) };
        let identity = build_identity(user, Vec::new()).unwrap();

        assert_eq!(identity.email, "public@example.com");
        assert!(!identity.verified);
    }

    #[test]
    fn test_no_email_is_malformed() {
        let user = GitHubUser { id: 7, email: None };
        assert!(matches!(build_identity(user, Vec::new()), Err(ProviderError::Malformed { .. })));
    }

    #[test]
    fn test_token_error_body_is_rejection() {
        let body = r#"{"error":"bad_verification_code","error_description":"The code passed is incorrect or expired."}"#;
        match parse_token_body(body) {
            Err(ProviderError::Rejected { reason, .. }) => assert!(reason.contains("incorrect")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_token_body_parses() {
        let body = r#"{"access_token":"gho_abc","token_type":"bearer","scope":"user:email"}"#;
        assert_eq!(parse_token_body(body).unwrap(), "gho_abc");
    }
}
