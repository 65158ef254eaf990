//! Hackathon record - root of the registration aggregate.

use serde::{Deserialize, Serialize};

/// A hackathon that teams register for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hackathon {
    /// Relational id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Short description shown in listings.
    pub start_description: String,
    /// Full description.
    pub description: String,
    /// Maximum team size.
    pub max_members: i64,
    /// Start timestamp (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    /// End timestamp (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
}
