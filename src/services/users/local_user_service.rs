//! # 로컬 계정 관리 서비스
//!
//! 사용자당 최대 하나인 이메일/비밀번호 자격 증명의 생명주기를 관리합니다.
//!
//! ## 불변식
//!
//! - 사용자당 로컬 자격 증명은 최대 1개
//! - 이메일은 모든 로컬 자격 증명 사이에서 유일 (정규화된 소문자 기준)
//! - 이메일이 바뀌면 검증 상태는 `false`로 초기화
//! - 평문 비밀번호는 저장하거나 로그에 남기지 않음
//!
//! 유일성 검사는 서비스가 아니라 저장소의 원자적 쓰기에서 이루어지므로,
//! 같은 이메일로 동시에 생성하면 정확히 하나만 성공하고 나머지는 `Conflict`입니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let service = LocalUserService::new(store, Arc::new(BcryptPasswordHasher::from_config()?));
//!
//! let credential = service
//!     .create_local_auth_user(user_id, "john@example.com", "SecurePass123")
//!     .await?;
//! assert!(!credential.email_verified);
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::domain::dto::{EmailInput, NewLocalCredentialInput};
use crate::domain::{LocalCredential, UserId};
use crate::errors::errors::{AppError, AppResult};
use crate::repositories::store::{LocalCredentialStore, StoreError};
use crate::services::auth::PasswordHasher;
use crate::utils::string_utils::normalize_email;
use crate::utils::time_utils::now_millis;

const INVALID_CREDENTIALS: &str = "잘못된 이메일 또는 비밀번호입니다";

fn not_found(user_id: &UserId) -> AppError {
    AppError::NotFound(format!("로컬 계정이 없습니다: {}", user_id))
}

/// 로컬 계정 관리자
///
/// 저장소와 해셔는 생성자로 주입됩니다. 서비스 자체는 상태가 없으므로
/// `Arc`로 감싸 여러 태스크에서 공유할 수 있습니다.
pub struct LocalUserService {
    store: Arc<dyn LocalCredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl LocalUserService {
    pub fn new(store: Arc<dyn LocalCredentialStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// 새 로컬 계정 생성
    ///
    /// # 반환값
    ///
    /// * `Ok(LocalCredential)` - 미검증 상태로 저장된 자격 증명
    /// * `Err(AppError::InvalidInput)` - 이메일 형식 또는 비밀번호 규칙 위반
    /// * `Err(AppError::Conflict)` - 이미 로컬 계정이 있는 사용자이거나 이메일 중복
    /// * `Err(AppError::Unavailable)` - 저장소 접근 불가
    pub async fn create_local_auth_user(
        &self,
        user_id: UserId,
        email: &str,
        password: &str,
    ) -> AppResult<LocalCredential> {
        let start_time = Instant::now();
        let input = NewLocalCredentialInput::parse(email, password)?;

        let password_hash = self.hasher.hash(&input.password).await?;
        let credential = LocalCredential::new(user_id, input.email, password_hash, now_millis());

        let created = self.store.insert(credential).await?;

        log::info!("로컬 계정 생성: {} ({:?})", user_id, start_time.elapsed());
        Ok(created)
    }

    /// 이메일 검증 상태 변경
    ///
    /// 현재 값과 같은 값으로 설정하면 레코드(`updated_at` 포함)는 변하지 않습니다.
    pub async fn update_local_email_verification_status(
        &self,
        user_id: UserId,
        verified: bool,
    ) -> AppResult<LocalCredential> {
        let credential = self.store
            .set_email_verified(&user_id, verified, now_millis())
            .await
            .map_err(|e| match e {
                StoreError::NotFound => not_found(&user_id),
                other => other.into(),
            })?;

        log::debug!("이메일 검증 상태: {} -> {}", user_id, credential.email_verified);
        Ok(credential)
    }

    /// 로그인 이메일 변경
    ///
    /// 변경되면 검증 상태가 `false`로 초기화됩니다.
    /// 이미 보유한 주소로 바꾸는 요청은 아무것도 변경하지 않고 성공합니다.
    pub async fn update_auth_user_email(
        &self,
        user_id: UserId,
        new_email: &str,
    ) -> AppResult<LocalCredential> {
        let input = EmailInput::parse(new_email)?;

        let current = self.store
            .find_by_user_id(&user_id)
            .await?
            .ok_or_else(|| not_found(&user_id))?;

        if current.email == input.email {
            return Ok(current);
        }

        let updated = self.store
            .update_email(&user_id, &input.email, now_millis())
            .await
            .map_err(|e| match e {
                StoreError::NotFound => not_found(&user_id),
                other => other.into(),
            })?;

        log::info!("로컬 계정 이메일 변경: {}", user_id);
        Ok(updated)
    }

    /// 로컬 계정 삭제
    pub async fn delete_auth_user(&self, user_id: UserId) -> AppResult<()> {
        self.store.delete(&user_id).await.map_err(|e| match e {
            StoreError::NotFound => not_found(&user_id),
            other => other.into(),
        })?;

        log::warn!("로컬 계정 삭제: {}", user_id);
        Ok(())
    }

    /// 로컬 계정 조회
    pub async fn get_local_auth_user(&self, user_id: UserId) -> AppResult<LocalCredential> {
        self.store
            .find_by_user_id(&user_id)
            .await?
            .ok_or_else(|| not_found(&user_id))
    }

    /// 이메일과 비밀번호 검증
    ///
    /// 존재하지 않는 이메일과 틀린 비밀번호는 같은 `Unauthorized` 메시지로 실패합니다.
    pub async fn verify_local_password(&self, email: &str, password: &str) -> AppResult<LocalCredential> {
        let start_time = Instant::now();

        let credential = self.store
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !self.hasher.verify(password, &credential.password_hash).await? {
            log::debug!("비밀번호 불일치: {}", credential.user_id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        log::debug!("Total password verification took: {:?}", start_time.elapsed());
        Ok(credential)
    }
}
