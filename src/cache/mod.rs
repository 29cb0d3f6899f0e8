//! Carta cache system.
//!
//! A single-layer, time-bounded read cache over the catalog store:
//!
//! - **Store**: key/value backend with per-entry expiry (no capacity
//!   eviction) behind [`CacheBackend`].
//! - **Gateway**: typed serde_json access with the degrade-to-miss policy.
//! - **Invalidation**: the mutation → key-set mapping that keeps reads
//!   coherent after every write.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! read_ttl_secs = 60
//! write_ttl_secs = 300
//! ```

mod config;
mod gateway;
mod invalidation;
mod keys;
pub(crate) mod lock;
mod store;

pub use config::CacheConfig;
pub use gateway::CacheGateway;
pub use invalidation::{CacheInvalidator, CatalogMutation, InvalidationPlan, plan_for};
pub use keys::CacheKey;
pub use store::{CacheBackend, CacheError, MemoryCache};
