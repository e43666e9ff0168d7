//! 장 시간에 맞춰 지수 옵션 PCR을 갱신하는 수집기.
//!
//! - 옵션 체인 조회 (NSE HTTP)
//! - 상태 저장소 (파일, Redis, 메모리)
//! - 새로고침 오케스트레이터와 백그라운드 핸들

pub mod clock;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod source;
pub mod stats;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CollectorConfig;
pub use error::{CollectorError, Result, SourceError, StoreError};
pub use orchestrator::{
    CycleOutcome, HydrationSource, MonitorSnapshot, OrchestratorHandle, OrchestratorSettings,
    RefreshOrchestrator, StatusCheck,
};
pub use source::{HttpOptionChainSource, OptionChainSource};
pub use stats::CycleStats;
pub use store::{FileStateStore, IndexMap, LastSession, MemoryStateStore, RedisStateStore, StateStore};
