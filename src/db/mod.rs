//! Relational data access traits.
//!
//! The cache core never talks SQL; on a miss it calls one of these
//! collaborators and stores whatever comes back. Implementations live with
//! the relational layer and are injected into the accessors at construction.
//!
//! Errors from these traits propagate to the accessor caller verbatim; the
//! cache adds no translation.

use async_trait::async_trait;

use crate::models::{Hackathon, Invite, Member, Team, User};

/// Fetch-on-miss source for hackathons.
#[async_trait]
pub trait HackathonDao: Send + Sync {
    async fn find_all(&self) -> anyhow::Result<Vec<Hackathon>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Hackathon>>;
}

/// Fetch-on-miss source for teams.
#[async_trait]
pub trait TeamDao: Send + Sync {
    async fn find_all(&self) -> anyhow::Result<Vec<Team>>;
    async fn find_by_hackathon(&self, hackathon_id: i64) -> anyhow::Result<Vec<Team>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Team>>;
}

/// Fetch-on-miss source for team memberships.
#[async_trait]
pub trait MemberDao: Send + Sync {
    async fn find_all(&self) -> anyhow::Result<Vec<Member>>;
    async fn find_by_team(&self, team_id: i64) -> anyhow::Result<Vec<Member>>;
    async fn find_by_hackathon(&self, hackathon_id: i64) -> anyhow::Result<Vec<Member>>;
    async fn find_leader(&self, team_id: i64) -> anyhow::Result<Option<Member>>;
    async fn find_by_team_and_user(
        &self,
        team_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Option<Member>>;
}

/// Fetch-on-miss source for invites.
#[async_trait]
pub trait InviteDao: Send + Sync {
    async fn find_by_user(&self, invite_user_id: i64) -> anyhow::Result<Vec<Invite>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Invite>>;
}

/// Fetch-on-miss source for users, keyed by external identity.
#[async_trait]
pub trait UserDao: Send + Sync {
    async fn find_by_telegram_id(&self, telegram_id: i64) -> anyhow::Result<Option<User>>;
}
