//! 프로세스 내 메모리 저장소.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{IndexMap, LastSession, StateStore};
use crate::error::StoreError;

/// 메모리 저장소.
///
/// `set_fail_writes(true)`로 쓰기 실패를 흉내낼 수 있습니다.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    indices: RwLock<Option<IndexMap>>,
    last_session: RwLock<Option<LastSession>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 미리 채워진 저장소를 생성합니다.
    pub fn with_state(indices: Option<IndexMap>, last_session: Option<LastSession>) -> Self {
        Self {
            indices: RwLock::new(indices),
            last_session: RwLock::new(last_session),
            ..Default::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 성공한 쓰기 횟수.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("memory store is read-only".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn save_indices(&self, indices: &IndexMap) -> Result<(), StoreError> {
        self.check_writable()?;
        *self.indices.write().await = Some(indices.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load_indices(&self) -> Result<Option<IndexMap>, StoreError> {
        Ok(self.indices.read().await.clone())
    }

    async fn save_last_session(&self, session: &LastSession) -> Result<(), StoreError> {
        self.check_writable()?;
        *self.last_session.write().await = Some(session.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load_last_session(&self) -> Result<Option<LastSession>, StoreError> {
        Ok(self.last_session.read().await.clone())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.indices.write().await = None;
        *self.last_session.write().await = None;
        Ok(())
    }
}
