use dashmap::DashMap;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Shareable in-memory key-value store for use across async handlers
///
/// Values are arbitrary JSON documents. A key is either present with a value
/// (which may itself be JSON `null`) or absent; there is no tombstone state.
/// Every operation is atomic with respect to other requests.
#[derive(Clone, Default)]
pub struct KvStore {
    inner: Arc<DashMap<String, JsonValue>>,
}

impl KvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value stored under `key`, if any
    pub fn get(&self, key: &str) -> Option<JsonValue> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    /// Insert or overwrite `key`, returning the value it replaced
    pub fn put(&self, key: String, value: JsonValue) -> Option<JsonValue> {
        self.inner.insert(key, value)
    }

    /// Remove `key`. Returns whether an entry was actually removed.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}
