//! Team record.

use serde::{Deserialize, Serialize};

/// A team inside a hackathon.
///
/// A team always has exactly one leader member and is deleted when the
/// leader leaves; that rule lives in the business layer, the cache only
/// has to clear every derived view when it happens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Relational id.
    pub id: i64,
    /// Team name (unique across the platform).
    pub name: String,
    /// Whether the team accepts new members.
    pub is_open: bool,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning hackathon.
    pub hackathon_id: i64,
}
