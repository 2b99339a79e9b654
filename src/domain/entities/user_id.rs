//! 사용자 식별자
//!
//! 상위 계정 생성 프로세스가 할당한 128비트 UUID입니다.
//! 이 코어는 식별자를 생성하지 않고 형식만 검증합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::errors::AppError;

/// 검증된 사용자 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// 문자열을 사용자 식별자로 파싱합니다.
    ///
    /// UUID 어휘 형식이 아니거나 nil UUID이면 `InvalidInput`을 반환합니다.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        let uuid = Uuid::parse_str(value.trim())
            .map_err(|_| AppError::InvalidInput(format!("Invalid user ID format: {}", value)))?;
        Self::from_uuid(uuid)
    }

    pub fn from_uuid(uuid: Uuid) -> Result<Self, AppError> {
        if uuid.is_nil() {
            return Err(AppError::InvalidInput("User ID must not be nil".to_string()));
        }
        Ok(Self(uuid))
    }
}

impl FromStr for UserId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 저장소 키로도 쓰이므로 항상 소문자 하이픈 형식
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_uuid() {
        let id = UserId::parse("6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b").unwrap();
        assert_eq!(id.to_string(), "6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b");
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let id = UserId::parse("  6F1C2A9E-3B4D-4E5F-8A7B-9C0D1E2F3A4B ").unwrap();
        assert_eq!(id.to_string(), "6f1c2a9e-3b4d-4e5f-8a7b-9c0d1e2f3a4b");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(UserId::parse("u1"), Err(AppError::InvalidInput(_))));
        assert!(matches!(UserId::parse(""), Err(AppError::InvalidInput(_))));
        assert!(matches!(
            UserId::parse("00000000-0000-0000-0000-000000000000"),
            Err(AppError::InvalidInput(_))
        ));
    }
}
