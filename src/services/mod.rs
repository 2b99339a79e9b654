//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! - [`users`] - 로컬 계정 / OAuth 연동 관리자
//! - [`auth`] - 비밀번호 해싱과 OAuth 프로바이더 클라이언트
//!
//! 서비스는 상태를 갖지 않으며 협력자를 `Arc<dyn Trait>`로 주입받습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::LocalUserService, auth::BcryptPasswordHasher};
//!
//! let service = LocalUserService::new(store, Arc::new(BcryptPasswordHasher::from_config()?));
//! ```

pub mod users;
pub mod auth;
