//! 에러 타입 정의.

use thiserror::Error;

/// 옵션 체인 조회 에러.
///
/// 한 심볼의 조회 실패를 나타내며 해당 주기 안에서만 처리됩니다.
#[derive(Debug, Error)]
pub enum SourceError {
    /// 연결/타임아웃 등 전송 계층 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 2xx가 아닌 응답
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// JSON 구조가 예상과 다름
    #[error("응답 파싱 실패: {0}")]
    Parse(String),

    /// JSON 대신 HTML(봇 차단 페이지)이 반환됨
    #[error("업스트림 차단: {0}")]
    Blocked(String),
}

impl SourceError {
    /// 다음 주기에 재시도하면 성공할 가능성이 있는지 여부.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Blocked(_) => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Parse(_) => false,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Http {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Self::Network(err.to_string()),
        }
    }
}

/// 상태 저장소 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("저장소 I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    #[error("저장소 직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 백엔드(Redis 등) 에러
    #[error("저장소 백엔드 에러: {0}")]
    Backend(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 옵션 체인 소스 에러
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// 상태 저장소 에러
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// 핵심 라이브러리 에러
    #[error("Core error: {0}")]
    Core(#[from] pcr_core::PcrError),

    /// 일반 에러
    #[error("Error: {0}")]
    Other(String),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_retryable() {
        assert!(SourceError::Network("timeout".into()).is_retryable());
        assert!(SourceError::Blocked("captcha".into()).is_retryable());
        assert!(SourceError::Http { status: 503, message: String::new() }.is_retryable());
        assert!(SourceError::Http { status: 429, message: String::new() }.is_retryable());
        assert!(!SourceError::Http { status: 404, message: String::new() }.is_retryable());
        assert!(!SourceError::Parse("missing".into()).is_retryable());
    }

    #[test]
    fn test_collector_error_from_core() {
        let err: CollectorError = pcr_core::PcrError::Config("bad".into()).into();
        assert!(matches!(err, CollectorError::Core(_)));
        assert_eq!(err.to_string(), "Core error: 설정 에러: bad");
    }
}
