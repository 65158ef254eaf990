//! Caller identity boundary.
//!
//! Signature verification happens outside the cache core; the only
//! capability consumed here is turning an opaque caller credential into the
//! external identity id (`telegram_id`) that keys the `User` cache.

use async_trait::async_trait;

/// Resolves a caller credential to a user cache lookup key.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve `credential` to a telegram id, or `None` for unknown callers.
    async fn resolve(&self, credential: &str) -> anyhow::Result<Option<i64>>;
}
