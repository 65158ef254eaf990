//! Invite record linking a team to an invited user.

use serde::{Deserialize, Serialize};

/// An outstanding invitation of a user into a team.
///
/// At most one invite per (team, user) pair is meaningful; duplicates are
/// rejected by the business layer before the cache is ever touched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    /// Relational id.
    pub id: i64,
    /// Telegram id of the invited user.
    pub invite_user_id: i64,
    /// Inviting team.
    pub team_id: i64,
}
