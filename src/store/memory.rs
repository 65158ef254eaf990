//! In-memory key-value store with Redis-like TTL semantics.
//!
//! Backs the test suite and local development; behaves like the real store
//! for everything the cache core relies on: TTL expiry, blob vs hash
//! values, and prefix deletes. A manual test clock (`advance`) makes TTL
//! expiry testable without sleeping, and `set_offline` simulates an outage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use super::KeyValueStore;
use crate::StoreError;

#[derive(Clone, Debug)]
enum Stored {
    Blob(String),
    Hash(HashMap<String, String>),
}

#[derive(Clone, Debug)]
struct Entry {
    value: Stored,
    expires_at: Option<Instant>,
}

/// In-process fake of the key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
    /// Milliseconds added to the real clock by `advance`.
    clock_offset_ms: AtomicU64,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the store's clock forward, expiring entries whose TTL has
    /// passed. Test hook; the real store expires on its own.
    pub fn advance(&self, by: Duration) {
        self.clock_offset_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    /// Simulate the store being unreachable: every operation fails until
    /// switched back online.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of live (unexpired) keys. Test helper.
    pub fn live_len(&self) -> usize {
        let now = self.now();
        self.entries
            .iter()
            .filter(|e| e.value().expires_at.is_none_or(|at| at > now))
            .count()
    }

    fn now(&self) -> Instant {
        Instant::now() + Duration::from_millis(self.clock_offset_ms.load(Ordering::SeqCst))
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(())
    }

    /// Read a live entry, dropping it if expired.
    fn live_entry(&self, key: &str) -> Option<Entry> {
        let now = self.now();
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if entry.expires_at.is_none_or(|at| at > now) {
                    return Some(entry.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    fn deadline(&self, ttl_secs: u64) -> Option<Instant> {
        Some(self.now() + Duration::from_secs(ttl_secs))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_online()?;
        Ok(self.live_entry(key).and_then(|e| match e.value {
            Stored::Blob(s) => Some(s),
            Stored::Hash(_) => None,
        }))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_online()?;
        self.entries.insert(
            key.to_string(),
            Entry {
                value: Stored::Blob(value.to_string()),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError> {
        self.check_online()?;
        self.entries.insert(
            key.to_string(),
            Entry {
                value: Stored::Blob(value.to_string()),
                expires_at: self.deadline(ttl_secs),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check_online()?;
        self.entries.remove(key);
        Ok(())
    }

    async fn delete_by_prefix(&self, prefix: &str) -> Result<(), StoreError> {
        self.check_online()?;
        self.entries.retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        self.check_online()?;
        Ok(self
            .live_entry(key)
            .and_then(|e| match e.value {
                Stored::Hash(map) => Some(map),
                Stored::Blob(_) => None,
            })
            .unwrap_or_default())
    }

    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError> {
        self.check_online()?;
        let mut entry = match self.live_entry(key) {
            Some(Entry {
                value: Stored::Blob(_),
                ..
            }) => return Err(StoreError::WrongType(key.to_string())),
            Some(entry) => entry,
            None => Entry {
                value: Stored::Hash(HashMap::new()),
                expires_at: None,
            },
        };
        if let Stored::Hash(map) = &mut entry.value {
            for (field, value) in fields {
                map.insert(field.clone(), value.clone());
            }
        }
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn hash_set_field(
        &self,
        key: &str,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.hash_set(key, &[(field.to_string(), value.to_string())])
            .await
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), StoreError> {
        self.check_online()?;
        let deadline = self.deadline(ttl_secs);
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.expires_at = deadline;
        }
        Ok(())
    }
}
