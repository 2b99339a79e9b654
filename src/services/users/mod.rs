//! 계정 관리 서비스 모듈
//!
//! # Features
//!
//! - 로컬 계정 생성, 이메일 변경, 검증 상태 관리, 삭제
//! - 이메일/비밀번호 검증
//! - OAuth 계정 연동, 동기화, 해제
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱
//! - 이메일 및 외부 계정 중복 방지 (저장소의 원자적 유일성 제약)
//! - 입력값 검증
//! - 없는 이메일과 틀린 비밀번호를 구분하지 않는 인증 실패 메시지

pub mod local_user_service;
pub mod oauth_user_service;

pub use local_user_service::LocalUserService;
pub use oauth_user_service::OAuthUserService;
