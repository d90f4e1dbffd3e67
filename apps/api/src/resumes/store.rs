//! Key-value storage for résumé records.
//!
//! `ResumeStore` is the narrow interface to the external KV store. Values are
//! opaque strings here; the record shape belongs to `resumes::models`.
//! `AppState` holds an `Arc<dyn ResumeStore>`: Redis in production, an
//! in-memory map in tests.

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// All `(key, value)` pairs whose key matches a `prefix*` glob.
    async fn list(&self, pattern: &str) -> Result<Vec<(String, String)>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Returns whether the key existed.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// RedisResumeStore
// ────────────────────────────────────────────────────────────────────────────

pub struct RedisResumeStore {
    client: redis::Client,
}

impl RedisResumeStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl ResumeStore for RedisResumeStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn list(&self, pattern: &str) -> Result<Vec<(String, String)>, StoreError> {
        let mut conn = self.connection().await?;

        // SCAN walks the keyspace incrementally instead of blocking like KEYS.
        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter = conn.scan_match::<_, String>(pattern).await?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }
        // SCAN may return a key more than once.
        keys.sort();
        keys.dedup();
        debug!("Matched {} keys for pattern {pattern}", keys.len());

        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await?;
        Ok(present_entries(keys, values))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection().await?;
        let removed: u32 = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

/// Pairs keys with their MGET results. A key can disappear between SCAN and
/// MGET; those come back as nil and are skipped.
fn present_entries(keys: Vec<String>, values: Vec<Option<String>>) -> Vec<(String, String)> {
    keys.into_iter()
        .zip(values)
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
}


// ────────────────────────────────────────────────────────────────────────────
// MemoryResumeStore (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod memory {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use super::{ResumeStore, StoreError};

    #[derive(Default)]
    pub struct MemoryResumeStore {
        entries: RwLock<BTreeMap<String, String>>,
    }

    fn matches(pattern: &str, key: &str) -> bool {
        match pattern.strip_suffix('*') {
            Some(prefix) => key.starts_with(prefix),
            None => key == pattern,
        }
    }

    #[async_trait]
    impl ResumeStore for MemoryResumeStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.entries.read().await.get(key).cloned())
        }

        async fn list(&self, pattern: &str) -> Result<Vec<(String, String)>, StoreError> {
            Ok(self
                .entries
                .read()
                .await
                .iter()
                .filter(|(key, _)| matches(pattern, key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.entries
                .write()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<bool, StoreError> {
            Ok(self.entries.write().await.remove(key).is_some())
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_memory_store_glob_listing() {
        let store = MemoryResumeStore::default();
        store.set("resume:1", "a").await.unwrap();
        store.set("resume:2", "b").await.unwrap();
        store.set("session:1", "c").await.unwrap();

        let listed = store.list("resume:*").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(store.delete("resume:1").await.unwrap());
        assert!(!store.delete("resume:1").await.unwrap());
        assert_eq!(store.get("resume:2").await.unwrap().as_deref(), Some("b"));
    }
}
