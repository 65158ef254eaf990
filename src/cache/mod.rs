//! Cache core - codec, cache-or-fetch engine, accessors and cascades.
//!
//! ## Architecture
//!
//! Reads go through one accessor per entity (`HackathonCache`, `TeamCache`,
//! `MemberCache`, `InviteCache`, `UserCache`); each builds its keys from
//! [`keys`] and delegates to [`engine`]. Writes call the per-entity
//! `invalidate_*` cascades, which clear every derived view that could hold
//! the pre-write state. Cascades must run only after the relational write
//! has committed, otherwise a concurrent reader can repopulate the cache
//! with pre-commit data.
//!
//! All components share one injected [`KeyValueStore`](crate::store::KeyValueStore)
//! handle; there is no ambient global client.

pub mod codec;
pub mod engine;
pub mod keys;

mod hackathon;
mod invite;
mod member;
mod team;
mod user;

use tracing::{debug, warn};

use crate::StoreError;
use crate::store::KeyValueStore;

pub use hackathon::{HackathonCache, invalidate_hackathon};
pub use invite::{InviteCache, invalidate_invite};
pub use member::{MemberCache, invalidate_member};
pub use team::{TeamCache, invalidate_team};
pub use user::{UserCache, invalidate_user};

/// Delete a cache key as part of an invalidation cascade.
///
/// A failed delete here means a reader could observe stale data until the
/// TTL backstop, so the delete is retried once and the error propagated if
/// the retry fails too - the caller decides whether to fail the request or
/// proceed with a logged staleness risk.
pub(crate) async fn delete_invalidated(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<(), StoreError> {
    if let Err(e) = store.delete(key).await {
        warn!(key, error = %e, "invalidation delete failed, retrying");
        store.delete(key).await?;
    }
    debug!(key, "cache key invalidated");
    Ok(())
}
