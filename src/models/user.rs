//! User record - profile plus registration fields.
//!
//! Stored in the cache as a flat hash (field map) rather than a JSON blob,
//! so that the activity timestamp can be refreshed in place.

use serde::{Deserialize, Serialize};

use crate::cache::codec;

/// A registered user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Internal relational id.
    pub id: i64,
    /// Telegram id (external identity, and the cache key).
    pub telegram_id: i64,
    /// Telegram username.
    ///
    /// Free-form string fields round-trip through the hash decode
    /// heuristic, which retypes values like "2024" or "true"; every one of
    /// them accepts the retyped form back via the codec deserializers.
    #[serde(deserialize_with = "codec::string_or_number")]
    pub username: String,
    /// Telegram first name.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "codec::opt_string_or_number"
    )]
    pub first_name: Option<String>,
    /// Telegram last name.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "codec::opt_string_or_number"
    )]
    pub last_name: Option<String>,
    /// Full legal name from the registration form.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "codec::opt_string_or_number"
    )]
    pub full_name: Option<String>,
    /// Student flag from the registration form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_student: Option<bool>,
    /// Study group.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "codec::opt_string_or_number"
    )]
    pub group: Option<String>,
    /// Unix timestamp of the user's last activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<i64>,
}

impl User {
    /// Stamp the activity timestamp with the current time.
    pub fn touch(&mut self) {
        self.last_active = Some(chrono::Utc::now().timestamp());
    }
}
