//! # 로컬 계정 입력 검증
//!
//! 로컬 계정 연산에 들어오는 이메일/비밀번호를 `validator`로 검증합니다.
//!
//! ## 검증 규칙
//!
//! ### 이메일 (`email`)
//! - RFC 5322 표준 이메일 형식 준수
//! - 검증 전에 앞뒤 공백 제거 및 소문자 정규화
//! - 중복 여부는 저장소의 유니크 제약으로 검증
//!
//! ### 비밀번호 (`password`)
//! - 길이: 8자 이상, UTF-8 기준 72바이트 이하 (bcrypt는 72바이트 이후를 무시함)
//! - 필수 포함: 대문자, 소문자, 숫자

use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::errors::AppError;
use crate::utils::string_utils::normalize_email;

/// 새 로컬 계정 입력
#[derive(Debug, Clone, Validate)]
pub struct NewLocalCredentialInput {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, message = "비밀번호는 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_bytes"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

impl NewLocalCredentialInput {
    /// 이메일을 정규화하고 전체 규칙을 검증합니다.
    pub fn parse(email: &str, password: &str) -> Result<Self, AppError> {
        let input = Self {
            email: normalize_email(email),
            password: password.to_string(),
        };
        input.validate().map_err(into_invalid_input)?;
        Ok(input)
    }
}

/// 이메일 변경 입력
#[derive(Debug, Clone, Validate)]
pub struct EmailInput {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

impl EmailInput {
    pub fn parse(email: &str) -> Result<Self, AppError> {
        let input = Self {
            email: normalize_email(email),
        };
        input.validate().map_err(into_invalid_input)?;
        Ok(input)
    }
}

/// bcrypt 입력 한계 (바이트)
pub const MAX_PASSWORD_BYTES: usize = 72;

/// 멀티바이트 문자는 한 글자가 여러 바이트이므로 글자 수가 아니라 바이트 수로 제한합니다.
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message("비밀번호는 UTF-8 기준 72바이트 이하여야 합니다".into()));
    }
    Ok(())
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_lowercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 대문자, 소문자, 숫자를 포함해야 합니다".into()));
    }

    Ok(())
}

/// 검증 에러를 필드명 순으로 정렬된 한 줄 메시지로 변환합니다.
///
/// 비밀번호 값 자체는 메시지에 포함되지 않습니다.
fn into_invalid_input(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    messages.sort();

    AppError::InvalidInput(messages.join("; "))
}
