//! Membership cache accessor and invalidation cascade.

use std::sync::Arc;

use tracing::debug;

use crate::StoreError;
use crate::cache::keys::{self, DEFAULT_TTL_SECS};
use crate::cache::{delete_invalidated, engine};
use crate::db::MemberDao;
use crate::models::Member;
use crate::store::KeyValueStore;

/// Read access to team memberships through the cache.
pub struct MemberCache {
    store: Arc<dyn KeyValueStore>,
    dao: Arc<dyn MemberDao>,
}

impl MemberCache {
    pub fn new(store: Arc<dyn KeyValueStore>, dao: Arc<dyn MemberDao>) -> Self {
        Self { store, dao }
    }

    /// All memberships (`members`).
    pub async fn get_all(&self) -> anyhow::Result<Vec<Member>> {
        engine::get_or_fetch_many(self.store.as_ref(), &keys::members(), DEFAULT_TTL_SECS, || {
            self.dao.find_all()
        })
        .await
    }

    /// Memberships of one team (`members:team:{id}`).
    pub async fn get_by_team(&self, team_id: i64) -> anyhow::Result<Vec<Member>> {
        engine::get_or_fetch_many(
            self.store.as_ref(),
            &keys::members_by_team(team_id),
            DEFAULT_TTL_SECS,
            || self.dao.find_by_team(team_id),
        )
        .await
    }

    /// Memberships across one hackathon (`members:hackathon:{id}`).
    pub async fn get_by_hackathon(&self, hackathon_id: i64) -> anyhow::Result<Vec<Member>> {
        engine::get_or_fetch_many(
            self.store.as_ref(),
            &keys::members_by_hackathon(hackathon_id),
            DEFAULT_TTL_SECS,
            || self.dao.find_by_hackathon(hackathon_id),
        )
        .await
    }

    /// The team's leader (`members:team:{id}:leader`).
    pub async fn get_leader(&self, team_id: i64) -> anyhow::Result<Option<Member>> {
        engine::get_or_fetch_one(
            self.store.as_ref(),
            &keys::team_leader(team_id),
            DEFAULT_TTL_SECS,
            || self.dao.find_leader(team_id),
        )
        .await
    }

    /// One user's membership in a team (`members:team:{id}:member:{userId}`).
    pub async fn get_by_team_and_user(
        &self,
        team_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Option<Member>> {
        engine::get_or_fetch_one(
            self.store.as_ref(),
            &keys::team_member(team_id, user_id),
            DEFAULT_TTL_SECS,
            || self.dao.find_by_team_and_user(team_id, user_id),
        )
        .await
    }

    /// How many members a team currently has.
    pub async fn count_in_team(&self, team_id: i64) -> anyhow::Result<usize> {
        Ok(self.get_by_team(team_id).await?.len())
    }

    /// A user's membership anywhere in a hackathon.
    ///
    /// Not a cache key of its own: scans the hackathon-wide member list, so
    /// its correctness rides on `members:hackathon:{id}` being invalidated
    /// whenever any membership in that hackathon changes.
    pub async fn find_by_hackathon_and_user(
        &self,
        hackathon_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Option<Member>> {
        let members = self.get_by_hackathon(hackathon_id).await?;
        let member = members.into_iter().find(|m| m.user_id == user_id);
        debug!(
            hackathon_id,
            user_id,
            found = member.is_some(),
            "hackathon membership lookup"
        );
        Ok(member)
    }
}

/// Invalidate membership keys after a committed create/delete.
///
/// Always clears `members`, `members:hackathon:{id}` and
/// `members:team:{id}`. When the affected user is known, the composite key
/// is cleared - or, on create, pre-populated with the new membership via
/// `repopulate`. Pass `leader_changed` when the write touched the leader
/// (team creation, leader leaving).
pub async fn invalidate_member(
    store: &dyn KeyValueStore,
    team_id: i64,
    hackathon_id: i64,
    user_id: Option<i64>,
    leader_changed: bool,
    repopulate: Option<&Member>,
) -> Result<(), StoreError> {
    delete_invalidated(store, &keys::members()).await?;
    delete_invalidated(store, &keys::members_by_hackathon(hackathon_id)).await?;
    delete_invalidated(store, &keys::members_by_team(team_id)).await?;

    if let Some(user_id) = user_id {
        let key = keys::team_member(team_id, user_id);
        match repopulate {
            Some(member) => match serde_json::to_string(member) {
                Ok(json) => store.set_with_ttl(&key, &json, DEFAULT_TTL_SECS).await?,
                Err(e) => tracing::warn!(key, error = %e, "skipping member repopulation"),
            },
            None => delete_invalidated(store, &key).await?,
        }
    }

    if leader_changed {
        delete_invalidated(store, &keys::team_leader(team_id)).await?;
    }
    Ok(())
}
