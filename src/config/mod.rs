//! Configuration module for the cache core.
//!
//! Loads configuration from environment variables.

use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key-value store connection string (e.g. `redis://127.0.0.1:6379/0`).
    pub redis_url: String,

    /// Default TTL for cache entries, in seconds.
    pub cache_ttl_secs: u64,

    /// Socket-level timeout applied to all store operations, in seconds.
    pub redis_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if required environment variables are not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let cache_ttl_secs = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(3600);

        let redis_timeout_secs = env::var("REDIS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(20);

        Self {
            redis_url: env::var("REDIS_URL").expect("REDIS_URL must be set"),
            cache_ttl_secs,
            redis_timeout_secs,
        }
    }
}
