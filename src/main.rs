//! 계정 신원 코어 부트스트랩
//!
//! 환경 설정을 읽고 MongoDB 인덱스를 준비한 뒤 `IdentityCore` 구성이 가능한지 점검합니다.
//! 트래픽을 받지 않으며, 배포 전 설정과 저장소 연결을 확인하는 용도입니다.
//! 실제 서비스는 라이브러리의 `IdentityCore::from_collaborators`로 코어를 직접 구성합니다.

use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use auth_identity_core::core::IdentityCore;
use auth_identity_core::db::Database;
use auth_identity_core::errors::{AppError, AppResult};
use auth_identity_core::repositories::users::{LocalCredentialRepository, OAuthIdentityRepository};
use auth_identity_core::services::auth::{BcryptPasswordHasher, HttpProviderClient};

#[tokio::main]
async fn main() {
    load_env_file();
    init_logging();

    info!("🚀 계정 신원 코어 초기화 중...");

    if let Err(e) = check_bootstrap().await {
        error!("❌ 초기화 실패 ({}): {}", e.kind().as_str(), e);
        std::process::exit(1);
    }

    info!("✅ 초기화 완료");
}

/// 협력자를 모두 구성해 코어 조립까지 성공하는지 확인합니다.
async fn check_bootstrap() -> AppResult<()> {
    info!("📡 데이터베이스 연결 중...");
    let database = Arc::new(
        Database::from_env()
            .await
            .map_err(|e| AppError::unavailable("MongoDB 연결 실패", e))?,
    );

    let local_repo = Arc::new(LocalCredentialRepository::new(database.clone()));
    let oauth_repo = Arc::new(OAuthIdentityRepository::new(database));
    local_repo.ensure_indexes().await?;
    oauth_repo.ensure_indexes().await?;
    info!("✅ 인덱스 준비 완료");

    let hasher = BcryptPasswordHasher::from_config()?;
    info!("bcrypt cost: {}", hasher.cost());

    let provider_client = HttpProviderClient::from_env()?;
    let enabled = provider_client.enabled_providers();
    if enabled.is_empty() {
        info!("활성화된 OAuth 프로바이더 없음");
    } else {
        for provider in &enabled {
            info!("🔑 OAuth 프로바이더 활성화: {}", provider);
        }
    }

    let _core = IdentityCore::from_collaborators(
        local_repo,
        oauth_repo,
        Arc::new(hasher),
        Arc::new(provider_client),
    );
    info!("IdentityCore 구성 확인");

    Ok(())
}

/// PROFILE 환경변수에 따라 .env 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ()),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ()),
        _ => dotenv().map(|_| ()),
    };

    // 로거 초기화 전이므로 결과는 stderr로만 알림
    if let Err(e) = loaded {
        eprintln!("env 파일 로드 실패 (profile {}): {}", profile, e);
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info")
///
/// ```bash
/// RUST_LOG=auth_identity_core::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
}
