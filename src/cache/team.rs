//! Team cache accessor and invalidation cascade.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::StoreError;
use crate::cache::keys::{self, DEFAULT_TTL_SECS};
use crate::cache::member::MemberCache;
use crate::cache::{delete_invalidated, engine};
use crate::db::TeamDao;
use crate::models::Team;
use crate::store::KeyValueStore;

/// Read access to teams through the cache.
pub struct TeamCache {
    store: Arc<dyn KeyValueStore>,
    dao: Arc<dyn TeamDao>,
}

impl TeamCache {
    pub fn new(store: Arc<dyn KeyValueStore>, dao: Arc<dyn TeamDao>) -> Self {
        Self { store, dao }
    }

    /// All teams (`teams`).
    pub async fn get_all(&self) -> anyhow::Result<Vec<Team>> {
        engine::get_or_fetch_many(self.store.as_ref(), &keys::teams(), DEFAULT_TTL_SECS, || {
            self.dao.find_all()
        })
        .await
    }

    /// Teams of one hackathon (`teams:hackathon:{id}`).
    pub async fn get_by_hackathon(&self, hackathon_id: i64) -> anyhow::Result<Vec<Team>> {
        engine::get_or_fetch_many(
            self.store.as_ref(),
            &keys::teams_by_hackathon(hackathon_id),
            DEFAULT_TTL_SECS,
            || self.dao.find_by_hackathon(hackathon_id),
        )
        .await
    }

    /// One team by id (`team:{id}`).
    pub async fn get(&self, team_id: i64) -> anyhow::Result<Option<Team>> {
        engine::get_or_fetch_one(
            self.store.as_ref(),
            &keys::team(team_id),
            DEFAULT_TTL_SECS,
            || self.dao.find_by_id(team_id),
        )
        .await
    }

    /// The team, but only when `user_id` leads it.
    ///
    /// Returns `None` both for a missing team and for a caller who is not
    /// the leader; the business layer turns that into its error response.
    pub async fn get_for_leader(
        &self,
        members: &MemberCache,
        team_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Option<Team>> {
        let Some(team) = self.get(team_id).await? else {
            warn!(team_id, "team not found");
            return Ok(None);
        };

        let Some(leader) = members.get_leader(team_id).await? else {
            warn!(team_id, "team has no cached leader");
            return Ok(None);
        };

        if leader.user_id != user_id {
            debug!(team_id, user_id, "caller does not lead this team");
            return Ok(None);
        }
        Ok(Some(team))
    }
}

/// Invalidate team keys after a committed write.
///
/// `hackathon_id` clears the team lists (`teams`, `teams:hackathon:{id}`),
/// `team_id` the single record. On create, pass the new record as
/// `repopulate` to pre-populate `team:{id}`; update and delete paths must
/// leave it `None`.
pub async fn invalidate_team(
    store: &dyn KeyValueStore,
    hackathon_id: Option<i64>,
    team_id: Option<i64>,
    repopulate: Option<&Team>,
) -> Result<(), StoreError> {
    if let Some(hackathon_id) = hackathon_id {
        delete_invalidated(store, &keys::teams()).await?;
        delete_invalidated(store, &keys::teams_by_hackathon(hackathon_id)).await?;
    }

    if let Some(team_id) = team_id {
        let key = keys::team(team_id);
        delete_invalidated(store, &key).await?;

        if let Some(team) = repopulate {
            match serde_json::to_string(team) {
                Ok(json) => store.set_with_ttl(&key, &json, DEFAULT_TTL_SECS).await?,
                Err(e) => warn!(key, error = %e, "skipping team repopulation"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    use crate::store::MemoryStore;

    struct StubDao {
        teams: Vec<Team>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TeamDao for StubDao {
        async fn find_all(&self) -> anyhow::Result<Vec<Team>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.teams.clone())
        }

        async fn find_by_hackathon(&self, hackathon_id: i64) -> anyhow::Result<Vec<Team>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .teams
                .iter()
                .filter(|t| t.hackathon_id == hackathon_id)
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Team>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.teams.iter().find(|t| t.id == id).cloned())
        }
    }

    fn team(id: i64, name: &str, hackathon_id: i64) -> Team {
        Team {
            id,
            name: name.to_string(),
            is_open: true,
            description: None,
            hackathon_id,
        }
    }

    fn setup(teams: Vec<Team>) -> (Arc<MemoryStore>, Arc<StubDao>, TeamCache) {
        let store = Arc::new(MemoryStore::new());
        let dao = Arc::new(StubDao {
            teams,
            calls: AtomicUsize::new(0),
        });
        let cache = TeamCache::new(store.clone(), dao.clone());
        (store, dao, cache)
    }

    #[tokio::test]
    async fn by_hackathon_read_through() {
        let (store, dao, cache) = setup(vec![team(1, "Alpha", 1), team(2, "Beta", 2)]);

        let cold = cache.get_by_hackathon(1).await.unwrap();
        let warm = cache.get_by_hackathon(1).await.unwrap();
        assert_eq!(cold, warm);
        assert_eq!(cold, vec![team(1, "Alpha", 1)]);
        assert_eq!(dao.calls.load(Ordering::SeqCst), 1);
        assert!(store.get("teams:hackathon:1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_invalidates_lists_and_single() {
        let (store, _, cache) = setup(vec![team(1, "Alpha", 1)]);
        cache.get_all().await.unwrap();
        cache.get_by_hackathon(1).await.unwrap();
        cache.get(1).await.unwrap();

        invalidate_team(store.as_ref(), Some(1), Some(1), None).await.unwrap();
        assert_eq!(store.get("teams").await.unwrap(), None);
        assert_eq!(store.get("teams:hackathon:1").await.unwrap(), None);
        assert_eq!(store.get("team:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_can_prepopulate_single_record() {
        let (store, dao, cache) = setup(vec![team(1, "Alpha", 1)]);
        let created = team(1, "Alpha", 1);

        invalidate_team(store.as_ref(), Some(1), Some(1), Some(&created))
            .await
            .unwrap();

        // Single record is already warm; only list reads hit the dao.
        assert_eq!(cache.get(1).await.unwrap(), Some(created));
        assert_eq!(dao.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalidation_failure_propagates() {
        let (store, _, _) = setup(vec![]);
        store.set_offline(true);
        assert!(invalidate_team(store.as_ref(), Some(1), Some(1), None).await.is_err());
    }
}
