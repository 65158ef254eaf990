//! Invite cache accessor and invalidation cascade.

use std::sync::Arc;

use crate::StoreError;
use crate::cache::keys::{self, DEFAULT_TTL_SECS};
use crate::cache::{delete_invalidated, engine};
use crate::db::InviteDao;
use crate::models::Invite;
use crate::store::KeyValueStore;

/// Read access to invites through the cache.
pub struct InviteCache {
    store: Arc<dyn KeyValueStore>,
    dao: Arc<dyn InviteDao>,
}

impl InviteCache {
    pub fn new(store: Arc<dyn KeyValueStore>, dao: Arc<dyn InviteDao>) -> Self {
        Self { store, dao }
    }

    /// Invites addressed to a user (`invites:user:{userId}`).
    pub async fn get_for_user(&self, invite_user_id: i64) -> anyhow::Result<Vec<Invite>> {
        engine::get_or_fetch_many(
            self.store.as_ref(),
            &keys::invites_by_user(invite_user_id),
            DEFAULT_TTL_SECS,
            || self.dao.find_by_user(invite_user_id),
        )
        .await
    }

    /// One invite by id (`invite:{id}`).
    pub async fn get(&self, invite_id: i64) -> anyhow::Result<Option<Invite>> {
        engine::get_or_fetch_one(
            self.store.as_ref(),
            &keys::invite(invite_id),
            DEFAULT_TTL_SECS,
            || self.dao.find_by_id(invite_id),
        )
        .await
    }
}

/// Invalidate invite keys after a committed create/delete.
///
/// Duplicate invites are rejected by the business layer before any cache
/// interaction, so this cascade only ever runs for writes that actually
/// committed.
pub async fn invalidate_invite(
    store: &dyn KeyValueStore,
    invite_user_id: Option<i64>,
    invite_id: Option<i64>,
) -> Result<(), StoreError> {
    if let Some(invite_user_id) = invite_user_id {
        delete_invalidated(store, &keys::invites_by_user(invite_user_id)).await?;
    }
    if let Some(invite_id) = invite_id {
        delete_invalidated(store, &keys::invite(invite_id)).await?;
    }
    Ok(())
}
