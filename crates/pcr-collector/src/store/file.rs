//! JSON 파일 저장소.
//!
//! 각 문서는 임시 파일에 쓴 뒤 rename으로 교체하므로
//! 읽는 쪽은 이전 문서나 새 문서 중 하나만 보게 됩니다.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{IndexMap, LastSession, StateStore};
use crate::error::StoreError;

const INDICES_FILE: &str = "indices.json";
const LAST_SESSION_FILE: &str = "last_session.json";

#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let json = serde_json::to_vec_pretty(value)?;
        let target = self.dir.join(name);
        let tmp = self.dir.join(format!(".{}.tmp", name));

        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &target).await?;

        debug!(path = %target.display(), bytes = json.len(), "상태 파일 저장");
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, name: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn save_indices(&self, indices: &IndexMap) -> Result<(), StoreError> {
        self.write_json(INDICES_FILE, indices).await
    }

    async fn load_indices(&self) -> Result<Option<IndexMap>, StoreError> {
        self.read_json(INDICES_FILE).await
    }

    async fn save_last_session(&self, session: &LastSession) -> Result<(), StoreError> {
        self.write_json(LAST_SESSION_FILE, session).await
    }

    async fn load_last_session(&self) -> Result<Option<LastSession>, StoreError> {
        self.read_json(LAST_SESSION_FILE).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.remove(INDICES_FILE).await?;
        self.remove(LAST_SESSION_FILE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pcr_core::{IndexState, IndexSymbol};

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pcr-store-{}-{}", tag, std::process::id()))
    }

    fn sample_map() -> IndexMap {
        let mut map = IndexMap::new();
        map.insert(
            IndexSymbol::Nifty,
            IndexState::new(IndexSymbol::Nifty, "30-OCT-2025", "27-NOV-2025"),
        );
        map
    }

    #[tokio::test]
    async fn test_missing_files_load_as_none() {
        let store = FileStateStore::new(temp_dir("missing"));
        assert!(store.load_indices().await.unwrap().is_none());
        assert!(store.load_last_session().await.unwrap().is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = temp_dir("roundtrip");
        let store = FileStateStore::new(&dir);
        let map = sample_map();
        let at = Utc.with_ymd_and_hms(2025, 10, 20, 10, 0, 0).unwrap();

        store.save_indices(&map).await.unwrap();
        store
            .save_last_session(&LastSession {
                date: at,
                timestamp: at,
                indices: map.clone(),
            })
            .await
            .unwrap();

        assert_eq!(store.load_indices().await.unwrap(), Some(map.clone()));
        let session = store.load_last_session().await.unwrap().unwrap();
        assert_eq!(session.date, at);
        assert_eq!(session.indices, map);
        assert!(!dir.join(".indices.json.tmp").exists());

        store.clear().await.unwrap();
        assert!(store.load_indices().await.unwrap().is_none());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = temp_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(INDICES_FILE), b"{ not json").unwrap();

        let store = FileStateStore::new(&dir);
        assert!(matches!(
            store.load_indices().await,
            Err(StoreError::Serialization(_))
        ));
        std::fs::remove_dir_all(&dir).ok();
    }
}
