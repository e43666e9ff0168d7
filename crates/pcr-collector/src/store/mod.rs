//! 상태 저장소.
//!
//! 두 종류의 문서를 다룹니다:
//! - 지수 스냅샷: 가장 최근에 성공한 주기의 전체 지수 상태
//! - 직전 거래 세션: 거래 시간 중(또는 마감 직후) 기록된 지수 상태
//!
//! 저장은 최선 노력(best-effort)이며 실패해도 메모리 상태는 유지됩니다.

mod file;
mod memory;
mod redis;

pub use self::file::FileStateStore;
pub use self::memory::MemoryStateStore;
pub use self::redis::RedisStateStore;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use pcr_core::{IndexState, IndexSymbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::StoreError;

/// 심볼별 지수 상태 맵.
pub type IndexMap = BTreeMap<IndexSymbol, IndexState>;

/// 직전 거래 세션 기록.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSession {
    /// 기록된 세션 시각
    pub date: DateTime<Utc>,
    /// 기록을 쓴 시각
    pub timestamp: DateTime<Utc>,
    pub indices: IndexMap,
}

impl LastSession {
    /// 기록된 세션이 `now` 기준 `max_age` 이내인지 확인합니다.
    pub fn is_recent(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now.signed_duration_since(self.date) <= max_age
    }
}

/// 상태 저장소 인터페이스.
///
/// 한 주기의 쓰기는 문서 단위로 전부 반영되거나 전혀 반영되지 않아야 합니다.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn save_indices(&self, indices: &IndexMap) -> Result<(), StoreError>;

    async fn load_indices(&self) -> Result<Option<IndexMap>, StoreError>;

    async fn save_last_session(&self, session: &LastSession) -> Result<(), StoreError>;

    async fn load_last_session(&self) -> Result<Option<LastSession>, StoreError>;

    /// 저장된 모든 문서를 삭제합니다.
    async fn clear(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_last_session_recency() {
        let written = Utc.with_ymd_and_hms(2025, 10, 17, 10, 0, 0).unwrap();
        let session = LastSession {
            date: written,
            timestamp: written,
            indices: IndexMap::new(),
        };

        assert!(session.is_recent(written + Duration::days(7), Duration::days(7)));
        assert!(!session.is_recent(
            written + Duration::days(7) + Duration::seconds(1),
            Duration::days(7)
        ));
    }

    #[test]
    fn test_index_map_serializes_symbol_keys() {
        let mut map = IndexMap::new();
        map.insert(
            IndexSymbol::BankNifty,
            IndexState::new(IndexSymbol::BankNifty, "30-OCT-2025", "27-NOV-2025"),
        );
        let json = serde_json::to_value(&map).unwrap();
        assert!(json.get("BANKNIFTY").is_some());

        let restored: IndexMap = serde_json::from_value(json).unwrap();
        assert_eq!(restored, map);
    }
}
