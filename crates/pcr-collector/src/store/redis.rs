//! Redis 저장소.
//!
//! 두 문서를 `{prefix}:indices`, `{prefix}:last_session` 키에 JSON 문자열로
//! 만료 없이 저장합니다.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::{IndexMap, LastSession, StateStore};
use crate::error::StoreError;

/// Redis 연결 래퍼.
#[derive(Clone)]
pub struct RedisStateStore {
    connection: Arc<RwLock<MultiplexedConnection>>,
    prefix: String,
}

impl RedisStateStore {
    /// Redis에 연결합니다.
    pub async fn connect(url: &str, prefix: impl Into<String>) -> Result<Self, StoreError> {
        info!("Connecting to Redis...");

        let client = Client::open(url)?;
        let connection = client.get_multiplexed_async_connection().await?;

        info!("Redis connection established");

        Ok(Self {
            connection: Arc::new(RwLock::new(connection)),
            prefix: prefix.into(),
        })
    }

    pub fn indices_key(&self) -> String {
        key(&self.prefix, "indices")
    }

    pub fn last_session_key(&self) -> String {
        key(&self.prefix, "last_session")
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut conn = self.connection.write().await;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        let mut conn = self.connection.write().await;
        let _: () = conn.set(key, json).await?;
        Ok(())
    }
}

fn key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}:{}", prefix, name)
    }
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn save_indices(&self, indices: &IndexMap) -> Result<(), StoreError> {
        self.set_json(&self.indices_key(), indices).await
    }

    async fn load_indices(&self) -> Result<Option<IndexMap>, StoreError> {
        self.get_json(&self.indices_key()).await
    }

    async fn save_last_session(&self, session: &LastSession) -> Result<(), StoreError> {
        self.set_json(&self.last_session_key(), session).await
    }

    async fn load_last_session(&self) -> Result<Option<LastSession>, StoreError> {
        self.get_json(&self.last_session_key()).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let keys = [self.indices_key(), self.last_session_key()];
        let mut conn = self.connection.write().await;
        let _: i64 = conn.del(&keys[..]).await?;
        Ok(())
    }
}
