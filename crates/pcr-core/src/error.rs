//! PCR 모니터링 핵심 에러 타입.

use thiserror::Error;

/// 핵심 라이브러리 에러.
#[derive(Debug, Error)]
pub enum PcrError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 캘린더/시간 계산 에러
    #[error("캘린더 에러: {0}")]
    Calendar(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type PcrResult<T> = Result<T, PcrError>;

impl From<serde_json::Error> for PcrError {
    fn from(err: serde_json::Error) -> Self {
        PcrError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for PcrError {
    fn from(err: config::ConfigError) -> Self {
        PcrError::Config(err.to_string())
    }
}
