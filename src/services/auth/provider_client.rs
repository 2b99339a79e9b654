//! # 프로바이더 클라이언트 계약
//!
//! OAuth 프로바이더와의 교환을 추상화합니다. 계정 관리자는 [`ProviderClient`]에만
//! 의존하며 프로바이더별 HTTP 세부사항은 구현체가 담당합니다.
//!
//! ## HTTP 응답 분류
//!
//! | 응답 | 분류 | 코어 에러 |
//! |------|------|-----------|
//! | 400 / 401 / 403 | [`ProviderError::Rejected`] | `Unauthorized` |
//! | 그 외 비성공 상태, 전송 실패 | [`ProviderError::Unavailable`] | `Unavailable` |
//! | 해석 불가능한 본문 | [`ProviderError::Malformed`] | `Unavailable` |
//! | 설정되지 않은 프로바이더 | [`ProviderError::NotConfigured`] | `InvalidInput` |

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::OAuthProvider;
use crate::domain::ProviderIdentity;
use crate::errors::errors::{AppError, BoxError};

/// 프로바이더 교환 실패
#[derive(Error, Debug)]
pub enum ProviderError {
    /// 프로바이더가 코드/토큰을 거부함
    #[error("{provider} rejected the credential: {reason}")]
    Rejected {
        provider: OAuthProvider,
        reason: String,
    },

    #[error("{provider} is unavailable: {message}")]
    Unavailable {
        provider: OAuthProvider,
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("{0} is not configured")]
    NotConfigured(OAuthProvider),

    #[error("{provider} returned an unexpected response: {message}")]
    Malformed {
        provider: OAuthProvider,
        message: String,
    },
}

impl ProviderError {
    /// 비성공 HTTP 상태를 분류합니다.
    pub fn from_status(provider: OAuthProvider, status: StatusCode, stage: &str) -> Self {
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::Rejected {
                    provider,
                    reason: format!("{} answered {}", stage, status),
                }
            }
            _ => ProviderError::Unavailable {
                provider,
                message: format!("{} answered {}", stage, status),
                source: format!("HTTP {}", status).into(),
            },
        }
    }

    /// 요청 전송 또는 본문 읽기 실패를 분류합니다.
    pub fn from_reqwest(provider: OAuthProvider, stage: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ProviderError::Malformed {
                provider,
                message: format!("{}: {}", stage, err),
            };
        }
        ProviderError::Unavailable {
            provider,
            message: format!("{} request failed", stage),
            source: Box::new(err),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { provider, reason } => {
                AppError::Unauthorized(format!("{} rejected the credential: {}", provider, reason))
            }
            ProviderError::Unavailable { provider, message, source } => AppError::Unavailable {
                message: format!("{}: {}", provider, message),
                source,
            },
            ProviderError::NotConfigured(provider) => {
                AppError::InvalidInput(format!("OAuth provider {} is not configured", provider))
            }
            malformed @ ProviderError::Malformed { .. } => {
                AppError::unavailable("provider returned an unexpected response", malformed)
            }
        }
    }
}

/// OAuth 프로바이더 교환 협력자
///
/// 두 연산 모두 프로바이더가 검증한 외부 계정 정보를 반환합니다.
/// 구현체는 재시도하지 않습니다.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// authorization code를 교환하고 계정 정보를 조회합니다.
    async fn exchange_code(
        &self,
        provider: OAuthProvider,
        code: &str,
    ) -> Result<ProviderIdentity, ProviderError>;

    /// 이미 발급된 access token으로 계정 정보를 조회합니다.
    async fn exchange_token(
        &self,
        provider: OAuthProvider,
        access_token: &str,
    ) -> Result<ProviderIdentity, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::errors::ErrorKind;

    #[test]
    fn test_client_errors_are_rejections() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = ProviderError::from_status(OAuthProvider::Google, status, "token");
            assert!(matches!(err, ProviderError::Rejected { .. }));
            assert_eq!(AppError::from(err).kind(), ErrorKind::Unauthorized);
        }
    }

    #[test]
    fn test_server_errors_are_unavailable() {
        for status in [StatusCode::TOO_MANY_REQUESTS, StatusCode::BAD_GATEWAY, StatusCode::NOT_FOUND] {
            let err = ProviderError::from_status(OAuthProvider::GitHub, status, "user");
            assert!(AppError::from(err).kind().is_retryable());
        }
    }

    #[test]
    fn test_not_configured_is_invalid_input() {
        let err = AppError::from(ProviderError::NotConfigured(OAuthProvider::GitHub));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_malformed_keeps_source() {
        use std::error::Error as _;

        let err = AppError::from(ProviderError::Malformed {
            provider: OAuthProvider::Google,
            message: "missing id".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(err.source().unwrap().to_string().contains("missing id"));
    }
}
