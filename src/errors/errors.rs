//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 신원 코어가 호출자에게 돌려주는 작고 안정적인 에러 분류 체계입니다.
//! 저장소/프로바이더 등 협력자 에러는 이 분류로 재분류되어 전달되며,
//! 협력자 고유의 에러 형태는 호출자에게 노출되지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::AppError;
//!
//! async fn delete(user_id: &UserId) -> Result<(), AppError> {
//!     store.delete(user_id).await.map_err(|e| match e {
//!         StoreError::NotFound => AppError::NotFound("로컬 계정이 없습니다".to_string()),
//!         other => AppError::from(other),
//!     })
//! }
//! ```

use thiserror::Error;

/// 협력자 원인 에러를 보관하기 위한 박스 타입
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 애플리케이션 전역 에러 타입
///
/// 모든 코어 연산은 이 열거형 중 하나로 실패합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 잘못된 식별자, 이메일, 비밀번호 또는 누락된 필드 (호출자가 수정해야 함)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 프로바이더가 코드/토큰을 거부했거나 비밀번호가 틀림
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 유일성 불변식 위반 (중복 이메일, 중복 연동, 신원 드리프트)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 대상 레코드가 존재하지 않음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 저장소나 프로바이더에 일시적으로 접근할 수 없음
    ///
    /// 원인 에러는 `source()`로 보존됩니다.
    #[error("Unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: BoxError,
    },

    /// 프로그래머/환경 오류 (손상된 해시, 잘못된 bcrypt 비용 등)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// 호출자가 분기할 때 사용하는 에러 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    Unauthorized,
    Conflict,
    NotFound,
    Unavailable,
    Internal,
}

impl ErrorKind {
    /// 호출자 재량으로 백오프 후 재시도해도 안전한지 여부
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Unavailable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::Internal => "internal",
        }
    }
}

impl AppError {
    /// 원인 에러를 보존하는 `Unavailable` 생성
    pub fn unavailable<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        AppError::Unavailable {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidInput(_) => ErrorKind::InvalidInput,
            AppError::Unauthorized(_) => ErrorKind::Unauthorized,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Unavailable { .. } => ErrorKind::Unavailable,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 `Internal`로 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Internal(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(AppError::InvalidInput("x".into()).kind(), ErrorKind::InvalidInput);
        assert_eq!(AppError::Unauthorized("x".into()).kind(), ErrorKind::Unauthorized);
        assert_eq!(AppError::Conflict("x".into()).kind(), ErrorKind::Conflict);
        assert_eq!(AppError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(AppError::Internal("x".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_only_unavailable_is_retryable() {
        let err = AppError::unavailable("store down", "connection refused");
        assert!(err.kind().is_retryable());
        assert!(!ErrorKind::Conflict.is_retryable());
        assert!(!ErrorKind::InvalidInput.is_retryable());
    }

    #[test]
    fn test_unavailable_preserves_source() {
        let err = AppError::unavailable("provider unreachable", "timed out");
        assert_eq!(err.to_string(), "Unavailable: provider unreachable");
        assert_eq!(err.source().map(|s| s.to_string()), Some("timed out".to_string()));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::Internal(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected Internal");
        }
    }
}
