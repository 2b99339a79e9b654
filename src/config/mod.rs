//! # Configuration Module
//!
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 데이터베이스, 비밀번호 해싱 설정
//! - [`auth_config`] - OAuth 프로바이더 및 프로바이더 클라이언트 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="auth_identity"
//! export OAUTH_HTTP_TIMEOUT_SECS="10"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
