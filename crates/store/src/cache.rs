//! Moka-backed member cache.

use std::time::Duration;

use moka::sync::Cache;

use fundra_core::store::MemberCache;

/// TTL read-through cache over member-scoped JSON snapshots.
pub struct MokaMemberCache {
    inner: Cache<String, serde_json::Value>,
}

impl MokaMemberCache {
    /// Creates a cache holding up to `capacity` entries for
    /// `ttl_secs` seconds each.
    #[must_use]
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(Duration::from_secs(ttl_secs))
                .build(),
        }
    }
}

impl MemberCache for MokaMemberCache {
    fn get_or_set(
        &self,
        key: &str,
        factory: &dyn Fn() -> serde_json::Value,
    ) -> serde_json::Value {
        self.inner.get_with(key.to_string(), factory)
    }

    fn remove(&self, key: &str) {
        self.inner.invalidate(key);
    }
}
