//! 에러 분류 체계 모듈
//!
//! [`AppError`](errors::AppError)와 [`ErrorKind`](errors::ErrorKind)를 제공합니다.

pub mod errors;

pub use errors::*;
