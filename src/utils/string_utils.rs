//! # 문자열 유틸리티
//!
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.

/// 이메일을 비교/저장용 형태로 정규화합니다 (앞뒤 공백 제거, 소문자화).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 공백만 있는 문자열을 `None`으로 취급합니다.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
