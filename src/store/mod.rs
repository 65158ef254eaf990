//! Key-value store boundary.
//!
//! The cache core talks to exactly one shared store instance per process,
//! injected into every accessor and cascade at construction. `RedisStore`
//! is the production implementation; `MemoryStore` is an in-process fake
//! with the same TTL semantics for tests.

mod memory;
mod redis;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::StoreError;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

/// Wire surface the cache core needs from the key-value store.
///
/// Values are either opaque strings (JSON blobs of records or record lists)
/// or flat field maps (the `User` hash shape). Keys carry their own
/// namespace; the store does no interpretation.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value at `key`, `None` on a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` at `key` without a TTL.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Write `value` at `key`, expiring after `ttl_secs`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError>;

    /// Delete `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Delete every key starting with `prefix`.
    async fn delete_by_prefix(&self, prefix: &str) -> Result<(), StoreError>;

    /// Read all fields of the hash at `key`; empty map on a miss.
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;

    /// Write `fields` into the hash at `key`, creating it if absent.
    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError>;

    /// Write a single hash field.
    async fn hash_set_field(&self, key: &str, field: &str, value: &str)
    -> Result<(), StoreError>;

    /// Reset the TTL of `key` to `ttl_secs` from now.
    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), StoreError>;
}
