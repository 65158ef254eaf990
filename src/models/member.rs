//! Team membership record.

use serde::{Deserialize, Serialize};

/// Role a member holds inside a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Leader,
    Member,
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leader => write!(f, "leader"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// A user's membership in a team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Telegram id of the user.
    pub user_id: i64,
    /// Team the membership belongs to.
    pub team_id: i64,
    /// Display name snapshot taken at join time.
    pub username: String,
    /// Role within the team.
    pub role: MemberRole,
}

impl Member {
    /// Whether this member leads their team.
    pub fn is_leader(&self) -> bool {
        self.role == MemberRole::Leader
    }
}
