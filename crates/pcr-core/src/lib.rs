//! # PCR Core
//!
//! 지수 옵션 Put-Call Ratio 모니터링의 핵심 도메인 로직을 제공합니다.
//!
//! - 거래소 캘린더와 시장 상태 판단 ([`HoursOracle`])
//! - PCR/심리/추세 파생 ([`MetricEngine`])
//! - 개장 기준 그리드 스케줄 ([`IntervalScheduler`])
//! - 지수별 상태와 히스토리 ([`IndexState`])
//! - 설정, 로깅, 에러 타입
//!
//! 이 크레이트는 I/O를 수행하지 않습니다.

pub mod calendar;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod schedule;
pub mod types;

pub use calendar::*;
pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use metrics::*;
pub use schedule::*;
pub use types::*;
