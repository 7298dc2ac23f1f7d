//! Key/value seam behind the itinerary look-aside cache.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use wayfarer_core::{WayfarerError, WayfarerResult};

/// String-valued cache store.
///
/// Entries never expire on their own: freshness comes from writers
/// deleting the key on every change. Values are JSON so the trait stays
/// object safe and can sit behind `Arc<dyn CacheInterface>`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheInterface: Send + Sync {
    async fn get_raw(&self, key: &str) -> WayfarerResult<Option<String>>;

    /// Overwrites any existing entry.
    async fn set_raw(&self, key: &str, value: &str) -> WayfarerResult<()>;

    /// Writes only when the key is vacant. Returns whether it wrote.
    async fn set_raw_if_absent(&self, key: &str, value: &str) -> WayfarerResult<bool>;

    /// Returns whether an entry was removed.
    async fn delete(&self, key: &str) -> WayfarerResult<bool>;
}

/// Typed JSON access on top of [`CacheInterface`].
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// A stored value that no longer decodes is reported as a cache error.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> WayfarerResult<Option<T>> {
        self.get_raw(key)
            .await?
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|e| WayfarerError::Cache(format!("undecodable entry at {key}: {e}")))
            })
            .transpose()
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> WayfarerResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json).await
    }

    /// Leaves an existing entry untouched; it may be newer than `value`.
    async fn set_if_absent<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> WayfarerResult<bool> {
        let json = serde_json::to_string(value)?;
        self.set_raw_if_absent(key, &json).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}
