use std::time::Duration;

use serde_json::Value;

use crate::CacheKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheSettings {
    pub max_entries: u64,
    pub ttl: Duration,
}

/// Process-wide cache of successful anonymous GET responses.
pub(crate) struct ResponseCache {
    inner: mini_moka::sync::Cache<CacheKey, Value>,
}

impl ResponseCache {
    pub(crate) fn new(settings: CacheSettings) -> Self {
        ResponseCache {
            inner: mini_moka::sync::Cache::builder()
                .max_capacity(settings.max_entries)
                .time_to_live(settings.ttl)
                .build(),
        }
    }

    pub(crate) fn get(&self, key: &CacheKey) -> Option<Value> {
        self.inner.get(key)
    }

    pub(crate) fn insert(&self, key: CacheKey, value: Value) {
        self.inner.insert(key, value);
    }
}
