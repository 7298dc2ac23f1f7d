//! In-process cache used when Redis is disabled.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{hash_map::Entry, HashMap};
use tracing::debug;
use wayfarer_core::{HealthCheck, HealthStatus, WayfarerResult};

/// Cache backed by a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryCacheService {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryCacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `key` currently holds a value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    async fn get_raw(&self, key: &str) -> WayfarerResult<Option<String>> {
        let value = self.entries.read().get(key).cloned();
        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str) -> WayfarerResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_raw_if_absent(&self, key: &str, value: &str) -> WayfarerResult<bool> {
        match self.entries.write().entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                Ok(true)
            }
        }
    }

    async fn delete(&self, key: &str) -> WayfarerResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }
}

#[async_trait]
impl HealthCheck for InMemoryCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
