//! Generic cache-or-fetch engine.
//!
//! Read the key, fall back to the relational fetch on miss or corruption,
//! populate with TTL, return. Single records and lists share the same
//! machinery but keep statically-typed entry points, so callers never
//! inspect stored payload shapes at runtime.
//!
//! Concurrent misses on the same key are not deduplicated: both callers
//! fetch and the last writer wins in the cache. Accepted tradeoff - TTLs
//! are short and the relational store stays the source of truth.

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::store::KeyValueStore;

/// Cache-or-fetch for a single record.
///
/// A `None` from `fetch` propagates as not-found and is never cached, so
/// repeated misses cause repeated fetches. Fetch errors propagate verbatim.
pub async fn get_or_fetch_one<T, F, Fut>(
    store: &dyn KeyValueStore,
    key: &str,
    ttl_secs: u64,
    fetch: F,
) -> anyhow::Result<Option<T>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<Option<T>>>,
{
    if let Some(record) = read_cached::<T>(store, key).await {
        return Ok(Some(record));
    }

    let Some(record) = fetch().await? else {
        debug!(key, "not found in backing store, nothing cached");
        return Ok(None);
    };

    write_back(store, key, ttl_secs, &record).await;
    Ok(Some(record))
}

/// Cache-or-fetch for a list of records.
///
/// An empty list is data and is cached as `[]`; lists are only ever written
/// wholesale, never merged in place.
pub async fn get_or_fetch_many<T, F, Fut>(
    store: &dyn KeyValueStore,
    key: &str,
    ttl_secs: u64,
    fetch: F,
) -> anyhow::Result<Vec<T>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<Vec<T>>>,
{
    if let Some(records) = read_cached::<Vec<T>>(store, key).await {
        return Ok(records);
    }

    let records = fetch().await?;
    write_back(store, key, ttl_secs, &records).await;
    Ok(records)
}

/// Read and deserialize `key`. Store errors degrade to a miss; corrupt
/// entries are deleted and never surfaced.
async fn read_cached<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key).await {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(key, error = %e, "cache read failed, falling back to fetch");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            debug!(key, "cache hit");
            Some(value)
        }
        Err(e) => {
            warn!(key, error = %e, "corrupt cache entry, discarding");
            if let Err(e) = store.delete(key).await {
                warn!(key, error = %e, "failed to discard corrupt entry");
            }
            None
        }
    }
}

/// Serialize and store a fetched value. Populate failures only cost the
/// next reader a fetch, so they are logged and swallowed here.
async fn write_back<T: Serialize>(store: &dyn KeyValueStore, key: &str, ttl_secs: u64, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            warn!(key, error = %e, "failed to serialize value for cache");
            return;
        }
    };

    match store.set_with_ttl(key, &json, ttl_secs).await {
        Ok(()) => debug!(key, ttl_secs, "cache populated"),
        Err(e) => warn!(key, error = %e, "failed to populate cache"),
    }
}
