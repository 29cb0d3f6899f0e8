//! Cache configuration.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_READ_TTL_SECS: u64 = 60;
const DEFAULT_WRITE_TTL_SECS: u64 = 300;

/// Cache behavior knobs from `carta.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Disable to send every read to the store.
    pub enabled: bool,
    /// Expiry for list/detail entries populated on the read path.
    pub read_ttl_secs: u64,
    /// Longer expiry for entities cached opportunistically right after a
    /// create, while they are still certainly fresh.
    pub write_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            read_ttl_secs: DEFAULT_READ_TTL_SECS,
            write_ttl_secs: DEFAULT_WRITE_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn read_ttl(&self) -> Duration {
        Duration::from_secs(self.read_ttl_secs)
    }

    pub fn write_ttl(&self) -> Duration {
        Duration::from_secs(self.write_ttl_secs)
    }
}
