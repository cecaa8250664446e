//! Time-bounded response cache
//!
//! Entries live for a fixed TTL from the moment they are stored. There is no
//! manual invalidation; an expired entry is recomputed on the next lookup.

use anyhow::{anyhow, Result};
use moka::sync::Cache;
use std::time::Duration;

pub struct ResponseCache {
    entries: Cache<String, String>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        let entries = Cache::builder().time_to_live(ttl).build();
        Self { entries }
    }

    /// Cached body for `key`, computing and storing it with `render` on a miss.
    /// Failed renders are not cached.
    pub fn get_or_insert_with<F>(&self, key: &str, render: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(body) = self.entries.get(key) {
            tracing::debug!("Cache hit: {}", key);
            return Ok(body);
        }

        tracing::debug!("Cache miss: {}", key);
        self.entries
            .try_get_with(key.to_string(), render)
            .map_err(|e| anyhow!("{:#}", e))
    }
}
