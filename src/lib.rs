//! Hackreg - hackathon team registration cache core.
//!
//! Cache-aside layer between the registration API/bot surface and the
//! relational store. Reads go through per-entity accessors that populate a
//! shared key-value store on miss; writes run invalidation cascades that
//! clear every derived view of the changed row.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `store` - Key-value store boundary (Redis + in-memory fake)
//! - `models` - Entity records (Hackathon, Team, Member, Invite, User)
//! - `db` - Relational data access traits (fetch-on-miss collaborators)
//! - `auth` - Caller identity resolution boundary
//! - `cache` - Codec, cache-or-fetch engine, accessors and cascades

pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
mod error;
pub mod models;
pub mod store;

pub use error::StoreError;
