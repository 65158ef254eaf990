//! User cache accessor and invalidation.
//!
//! Users are the one entity stored as a flat hash rather than a JSON blob:
//! the activity timestamp is refreshed field-by-field, so the entry has to
//! stay incrementally updatable. Everything else about the read path is the
//! usual cache-aside shape, just spelled with hash operations.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::StoreError;
use crate::auth::IdentityResolver;
use crate::cache::keys::{self, DEFAULT_TTL_SECS};
use crate::cache::{codec, delete_invalidated};
use crate::db::UserDao;
use crate::models::User;
use crate::store::KeyValueStore;

/// Field refreshed in place by [`UserCache::touch_active`].
const LAST_ACTIVE_FIELD: &str = "last_active";

/// Read access to user profiles through the cache, keyed by external
/// identity (telegram id).
pub struct UserCache {
    store: Arc<dyn KeyValueStore>,
    dao: Arc<dyn UserDao>,
}

impl UserCache {
    pub fn new(store: Arc<dyn KeyValueStore>, dao: Arc<dyn UserDao>) -> Self {
        Self { store, dao }
    }

    /// Full profile by telegram id (`user:{telegramId}`).
    ///
    /// On miss the profile is fetched, stamped with a fresh `last_active`
    /// and stored as a field map with the default TTL. A hash that no
    /// longer decodes is discarded and re-fetched, like any corrupt entry.
    pub async fn get(&self, telegram_id: i64) -> anyhow::Result<Option<User>> {
        let key = keys::user(telegram_id);

        match self.store.hash_get_all(&key).await {
            Ok(fields) if !fields.is_empty() => match codec::decode_hash(&fields) {
                Ok(user) => {
                    debug!(key, "cache hit");
                    return Ok(Some(user));
                }
                Err(e) => {
                    warn!(key, error = %e, "corrupt user entry, discarding");
                    if let Err(e) = self.store.delete(&key).await {
                        warn!(key, error = %e, "failed to discard corrupt entry");
                    }
                }
            },
            Ok(_) => {}
            Err(e) => warn!(key, error = %e, "cache read failed, falling back to fetch"),
        }

        let Some(mut user) = self.dao.find_by_telegram_id(telegram_id).await? else {
            debug!(telegram_id, "user not found in backing store");
            return Ok(None);
        };
        user.touch();

        match codec::encode_hash(&user) {
            Ok(fields) => {
                let populated = async {
                    self.store.hash_set(&key, &fields).await?;
                    self.store.expire(&key, DEFAULT_TTL_SECS).await
                };
                match populated.await {
                    Ok(()) => debug!(key, "user cache populated"),
                    Err(e) => warn!(key, error = %e, "failed to populate user cache"),
                }
            }
            Err(e) => warn!(key, error = %e, "failed to flatten user for cache"),
        }
        Ok(Some(user))
    }

    /// Resolve a caller credential and read their profile.
    pub async fn get_by_credential(
        &self,
        resolver: &dyn IdentityResolver,
        credential: &str,
    ) -> anyhow::Result<Option<User>> {
        let Some(telegram_id) = resolver.resolve(credential).await? else {
            debug!("credential does not resolve to a known identity");
            return Ok(None);
        };
        self.get(telegram_id).await
    }

    /// Refresh `last_active` on an existing cache entry, in place.
    ///
    /// Updates only the one field and resets the TTL; no other key is
    /// invalidated. A missing entry is left alone - the next read
    /// populates it with a fresh timestamp anyway.
    pub async fn touch_active(&self, telegram_id: i64) -> Result<(), StoreError> {
        let key = keys::user(telegram_id);

        let fields = self.store.hash_get_all(&key).await?;
        if fields.is_empty() {
            debug!(key, "no cached profile to touch");
            return Ok(());
        }

        let now = chrono::Utc::now().timestamp();
        self.store
            .hash_set_field(&key, LAST_ACTIVE_FIELD, &now.to_string())
            .await?;
        self.store.expire(&key, DEFAULT_TTL_SECS).await?;
        debug!(key, last_active = now, "activity refreshed");
        Ok(())
    }
}

/// Invalidate a user profile after registration/profile fields changed.
///
/// Full delete, forcing a re-fetch; partial hash rewrites are reserved for
/// the activity timestamp.
pub async fn invalidate_user(
    store: &dyn KeyValueStore,
    telegram_id: i64,
) -> Result<(), StoreError> {
    delete_invalidated(store, &keys::user(telegram_id)).await
}
