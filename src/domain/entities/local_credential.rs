//! Local Credential Entity
//!
//! 비밀번호 기반 로컬 계정 레코드입니다. 사용자당 0개 또는 1개만 존재합니다.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user_id::UserId;
use crate::utils::time_utils::truncate_to_millis;

/// 로컬 인증 자격 증명
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalCredential {
    pub user_id: UserId,
    /// 정규화된(소문자) 이메일, 모든 로컬 계정에서 유일
    pub email: String,
    /// bcrypt 해시. 평문 비밀번호는 저장하지 않습니다.
    pub password_hash: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocalCredential {
    /// 새 로컬 자격 증명 생성
    ///
    /// 이메일 인증이 필요한 상태(`email_verified = false`)로 시작합니다.
    /// 시각은 저장소 정밀도(밀리초)로 잘립니다.
    pub fn new(user_id: UserId, email: String, password_hash: String, now: DateTime<Utc>) -> Self {
        let now = truncate_to_millis(now);
        Self {
            user_id,
            email,
            password_hash,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

// 해시가 로그에 남지 않도록 직접 구현
impl fmt::Debug for LocalCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalCredential")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("email_verified", &self.email_verified)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
