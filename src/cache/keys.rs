//! Cache key builders.
//!
//! The literal key strings are load-bearing: existing deployments share the
//! same namespace, so every key produced here must match them byte for byte.

/// Default TTL for cache entries, in seconds. Correctness backstop against
/// missed invalidations; no entry outlives it.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// `hackathons` - list of all hackathons.
pub fn hackathons() -> String {
    "hackathons".to_string()
}

/// `hackathon:{id}` - a single hackathon.
pub fn hackathon(id: i64) -> String {
    format!("hackathon:{id}")
}

/// `teams` - list of all teams.
pub fn teams() -> String {
    "teams".to_string()
}

/// `teams:hackathon:{id}` - teams of one hackathon.
pub fn teams_by_hackathon(hackathon_id: i64) -> String {
    format!("teams:hackathon:{hackathon_id}")
}

/// `team:{id}` - a single team.
pub fn team(id: i64) -> String {
    format!("team:{id}")
}

/// `members` - list of all memberships.
pub fn members() -> String {
    "members".to_string()
}

/// `members:hackathon:{id}` - memberships across one hackathon.
pub fn members_by_hackathon(hackathon_id: i64) -> String {
    format!("members:hackathon:{hackathon_id}")
}

/// `members:team:{id}` - memberships of one team.
pub fn members_by_team(team_id: i64) -> String {
    format!("members:team:{team_id}")
}

/// `members:team:{id}:leader` - the team's leader.
pub fn team_leader(team_id: i64) -> String {
    format!("members:team:{team_id}:leader")
}

/// `members:team:{id}:member:{userId}` - one user's membership in a team.
pub fn team_member(team_id: i64, user_id: i64) -> String {
    format!("members:team:{team_id}:member:{user_id}")
}

/// `invites:user:{userId}` - invites addressed to a user.
pub fn invites_by_user(invite_user_id: i64) -> String {
    format!("invites:user:{invite_user_id}")
}

/// `invite:{id}` - a single invite.
pub fn invite(id: i64) -> String {
    format!("invite:{id}")
}

/// `user:{telegramId}` - a user profile, keyed by external identity.
pub fn user(telegram_id: i64) -> String {
    format!("user:{telegram_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_namespace_is_literal() {
        assert_eq!(hackathons(), "hackathons");
        assert_eq!(hackathon(7), "hackathon:7");
        assert_eq!(teams(), "teams");
        assert_eq!(teams_by_hackathon(1), "teams:hackathon:1");
        assert_eq!(team(3), "team:3");
        assert_eq!(members(), "members");
        assert_eq!(members_by_hackathon(1), "members:hackathon:1");
        assert_eq!(members_by_team(3), "members:team:3");
        assert_eq!(team_leader(3), "members:team:3:leader");
        assert_eq!(team_member(3, 42), "members:team:3:member:42");
        assert_eq!(invites_by_user(42), "invites:user:42");
        assert_eq!(invite(9), "invite:9");
        assert_eq!(user(123456), "user:123456");
    }
}
