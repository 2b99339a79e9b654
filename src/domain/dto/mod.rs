//! # Input DTO Module
//!
//! 코어 연산으로 들어오는 원시 입력을 검증된 값으로 변환하는 구조체들입니다.
//! `validator` 크레이트의 derive 매크로로 형식 규칙을 선언합니다.

pub mod local_user;

pub use local_user::{EmailInput, NewLocalCredentialInput, MAX_PASSWORD_BYTES};
