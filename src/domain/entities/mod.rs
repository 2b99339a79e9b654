//! # Domain Entities
//!
//! 신원 코어가 다루는 영속 레코드들입니다.
//!
//! - [`user_id::UserId`] - 상위에서 할당된 사용자 식별자
//! - [`local_credential::LocalCredential`] - 비밀번호 기반 로컬 계정
//! - [`oauth_identity::OAuthIdentity`] - 프로바이더 연동 계정
//!
//! 한 사용자는 로컬 계정 없이 OAuth 신원만 가질 수도 있고 그 반대도 가능합니다.
//! 금지되는 것은 같은 종류의 중복뿐입니다 (로컬 1개, 프로바이더당 1개).

pub mod user_id;
pub mod local_credential;
pub mod oauth_identity;

pub use user_id::UserId;
pub use local_credential::LocalCredential;
pub use oauth_identity::OAuthIdentity;
