//! Entity records cached by the core.
//!
//! These mirror the shapes returned by the relational data access layer;
//! the cache never stores partial variants of them (whole records or whole
//! lists only, except the `User` hash path).

pub mod hackathon;
pub mod invite;
pub mod member;
pub mod team;
pub mod user;

pub use hackathon::Hackathon;
pub use invite::Invite;
pub use member::{Member, MemberRole};
pub use team::Team;
pub use user::User;
