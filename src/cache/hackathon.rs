//! Hackathon cache accessor and invalidation cascade.

use std::sync::Arc;

use crate::StoreError;
use crate::cache::keys::{self, DEFAULT_TTL_SECS};
use crate::cache::{delete_invalidated, engine};
use crate::db::HackathonDao;
use crate::models::Hackathon;
use crate::store::KeyValueStore;

/// Read access to hackathons through the cache.
pub struct HackathonCache {
    store: Arc<dyn KeyValueStore>,
    dao: Arc<dyn HackathonDao>,
}

impl HackathonCache {
    pub fn new(store: Arc<dyn KeyValueStore>, dao: Arc<dyn HackathonDao>) -> Self {
        Self { store, dao }
    }

    /// All hackathons (`hackathons`).
    pub async fn get_all(&self) -> anyhow::Result<Vec<Hackathon>> {
        engine::get_or_fetch_many(self.store.as_ref(), &keys::hackathons(), DEFAULT_TTL_SECS, || {
            self.dao.find_all()
        })
        .await
    }

    /// One hackathon by id (`hackathon:{id}`).
    pub async fn get(&self, hackathon_id: i64) -> anyhow::Result<Option<Hackathon>> {
        engine::get_or_fetch_one(
            self.store.as_ref(),
            &keys::hackathon(hackathon_id),
            DEFAULT_TTL_SECS,
            || self.dao.find_by_id(hackathon_id),
        )
        .await
    }
}

/// Invalidate hackathon keys after a committed create/update/delete.
///
/// Clears the hackathon list and the single record; with `cascade_teams`
/// the team cascade for this hackathon runs too (a deleted hackathon takes
/// its cached team lists with it).
pub async fn invalidate_hackathon(
    store: &dyn KeyValueStore,
    hackathon_id: i64,
    cascade_teams: bool,
) -> Result<(), StoreError> {
    delete_invalidated(store, &keys::hackathons()).await?;
    delete_invalidated(store, &keys::hackathon(hackathon_id)).await?;

    if cascade_teams {
        super::team::invalidate_team(store, Some(hackathon_id), None, None).await?;
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
        hackathons: Vec<Hackathon>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HackathonDao for StubDao {
        async fn find_all(&self) -> anyhow::Result<Vec<Hackathon>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.hackathons.clone())
        }

        async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Hackathon>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.hackathons.iter().find(|h| h.id == id).cloned())
        }
    }

    fn hackathon(id: i64) -> Hackathon {
        Hackathon {
            id,
            name: format!("Hack {id}"),
            start_description: "short".to_string(),
            description: "long".to_string(),
            max_members: 4,
            start_date: None,
            end_date: None,
        }
    }

    fn setup(hackathons: Vec<Hackathon>) -> (Arc<MemoryStore>, Arc<StubDao>, HackathonCache) {
        let store = Arc::new(MemoryStore::new());
        let dao = Arc::new(StubDao {
            hackathons,
            calls: AtomicUsize::new(0),
        });
        let cache = HackathonCache::new(store.clone(), dao.clone());
        (store, dao, cache)
    }

    #[tokio::test]
    async fn list_read_through_is_transparent() {
        let (_, dao, cache) = setup(vec![hackathon(1), hackathon(2)]);

        let cold = cache.get_all().await.unwrap();
        let warm = cache.get_all().await.unwrap();
        assert_eq!(cold, warm);
        assert_eq!(cold.len(), 2);
        assert_eq!(dao.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_hackathon_is_not_found() {
        let (store, _, cache) = setup(vec![]);
        assert_eq!(cache.get(5).await.unwrap(), None);
        assert_eq!(store.live_len(), 0);
    }

    #[tokio::test]
    async fn invalidation_clears_list_and_single() {
        let (store, dao, cache) = setup(vec![hackathon(1)]);
        cache.get_all().await.unwrap();
        cache.get(1).await.unwrap();
        assert_eq!(dao.calls.load(Ordering::SeqCst), 2);

        invalidate_hackathon(store.as_ref(), 1, false).await.unwrap();
        assert_eq!(store.get("hackathons").await.unwrap(), None);
        assert_eq!(store.get("hackathon:1").await.unwrap(), None);

        // Next reads re-fetch.
        cache.get_all().await.unwrap();
        cache.get(1).await.unwrap();
        assert_eq!(dao.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn cascade_reaches_team_keys() {
        let (store, _, _) = setup(vec![]);
        store.set("teams", "[]").await.unwrap();
        store.set("teams:hackathon:1", "[]").await.unwrap();

        invalidate_hackathon(store.as_ref(), 1, true).await.unwrap();
        assert_eq!(store.get("teams").await.unwrap(), None);
        assert_eq!(store.get("teams:hackathon:1").await.unwrap(), None);
    }
}
