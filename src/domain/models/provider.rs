//! 프로바이더 교환 모델
//!
//! 프로바이더 클라이언트와 주고받는 값 타입들입니다.

use std::fmt;

use crate::errors::errors::AppError;
use crate::utils::string_utils::non_blank;

/// 프로바이더가 검증해 준 외부 계정 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    pub provider_account_id: String,
    pub email: String,
    pub verified: bool,
}

/// 프로바이더에 전달할 자격 증명
///
/// 프로바이더의 교환 흐름에 따라 authorization code 또는 access token 중 하나입니다.
#[derive(Clone, PartialEq, Eq)]
pub enum ProviderCredential {
    Code(String),
    AccessToken(String),
}

impl ProviderCredential {
    /// 요청의 두 선택 필드로부터 자격 증명을 만듭니다.
    ///
    /// 정확히 하나만 비어 있지 않아야 합니다. 둘 다 비었거나 둘 다 채워졌으면 `InvalidInput`.
    pub fn from_parts(access_token: Option<&str>, code: Option<&str>) -> Result<Self, AppError> {
        match (non_blank(access_token), non_blank(code)) {
            (Some(token), None) => Ok(ProviderCredential::AccessToken(token.to_string())),
            (None, Some(code)) => Ok(ProviderCredential::Code(code.to_string())),
            (None, None) => Err(AppError::InvalidInput(
                "Either access_token or code is required".to_string(),
            )),
            (Some(_), Some(_)) => Err(AppError::InvalidInput(
                "Only one of access_token or code may be provided".to_string(),
            )),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProviderCredential::Code(_) => "code",
            ProviderCredential::AccessToken(_) => "access_token",
        }
    }
}

// 토큰/코드 값은 로그에 남기지 않음
impl fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProviderCredential::{}([REDACTED])", self.kind())
    }
}
