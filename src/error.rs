//! Error types for the key-value store boundary.

use thiserror::Error;

/// Error talking to the key-value store.
///
/// Kept separate from `anyhow` so that invalidation callers can tell a
/// store failure apart from a relational fetch failure: a failed
/// invalidation delete after a committed write must surface to the caller,
/// while a failed read only costs a fallback fetch.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend returned an error (protocol, I/O or timeout).
    #[error("key-value store error: {0}")]
    Backend(#[from] redis::RedisError),

    /// The store is unreachable (used by the in-memory fake's offline mode).
    #[error("key-value store unavailable: {0}")]
    Unavailable(String),

    /// A hash operation hit a key holding a non-hash value. Redis raises
    /// WRONGTYPE for this; the in-memory fake mirrors it.
    #[error("wrong value type at key '{0}'")]
    WrongType(String),
}
