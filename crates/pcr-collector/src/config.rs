//! 환경변수 기반 설정 모듈.
//!
//! 값이 없거나 잘못된 경우 기본값을 사용합니다.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::source::HttpOptionChainSource;
use crate::store::{FileStateStore, MemoryStateStore, RedisStateStore, StateStore};
use crate::Result;

/// NSE 지수 옵션 체인 API
pub const DEFAULT_SOURCE_URL: &str = "https://www.nseindia.com/api/option-chain-indices";

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 옵션 체인 소스 설정
    pub source: SourceConfig,
    /// 상태 저장소 설정
    pub store: StoreConfig,
    /// `pcr_core::PcrConfig` 파일 경로
    pub config_path: PathBuf,
}

/// 옵션 체인 소스 설정
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

/// 저장소 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    File,
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Redis => write!(f, "redis"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// 상태 저장소 설정
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// 파일 저장소 디렉토리
    pub data_dir: PathBuf,
    pub redis_url: String,
    /// Redis 키 접두사
    pub key_prefix: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig {
                base_url: DEFAULT_SOURCE_URL.to_string(),
                timeout_secs: 15,
            },
            store: StoreConfig {
                backend: StoreBackend::File,
                data_dir: PathBuf::from("./data"),
                redis_url: "redis://127.0.0.1:6379/0".to_string(),
                key_prefix: "pcr".to_string(),
            },
            config_path: PathBuf::from(pcr_core::DEFAULT_CONFIG_PATH),
        }
    }
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            source: SourceConfig {
                base_url: env_var_string("PCR_SOURCE_URL", defaults.source.base_url),
                timeout_secs: env_var_parse("PCR_SOURCE_TIMEOUT_SECS", defaults.source.timeout_secs),
            },
            store: StoreConfig {
                backend: env_var_parse("PCR_STORE", defaults.store.backend),
                data_dir: env_var_parse("PCR_DATA_DIR", defaults.store.data_dir),
                redis_url: env_var_string("REDIS_URL", defaults.store.redis_url),
                key_prefix: env_var_string("PCR_REDIS_PREFIX", defaults.store.key_prefix),
            },
            config_path: env_var_parse("PCR_CONFIG", defaults.config_path),
        })
    }

    /// HTTP 옵션 체인 소스 생성
    pub fn build_source(&self) -> Result<HttpOptionChainSource> {
        Ok(HttpOptionChainSource::new(
            self.source.base_url.clone(),
            self.source.timeout(),
        )?)
    }

    /// 설정된 저장소 생성 (Redis는 연결까지 수행)
    pub async fn build_store(&self) -> Result<Arc<dyn StateStore>> {
        let store: Arc<dyn StateStore> = match self.store.backend {
            StoreBackend::File => Arc::new(FileStateStore::new(&self.store.data_dir)),
            StoreBackend::Redis => Arc::new(
                RedisStateStore::connect(&self.store.redis_url, self.store.key_prefix.clone()).await?,
            ),
            StoreBackend::Memory => Arc::new(MemoryStateStore::new()),
        };
        Ok(store)
    }
}

impl SourceConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// 환경변수 문자열 (비어 있으면 기본값 사용)
fn env_var_string(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
