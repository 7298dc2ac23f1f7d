//! Redis-backed cache.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;
use std::sync::Arc;
use tracing::{debug, info};
use wayfarer_config::RedisConfig;
use wayfarer_core::{HealthCheck, HealthStatus, WayfarerError, WayfarerResult};

/// Cache on a deadpool Redis pool.
///
/// Values are written with a plain `SET` (or `SET NX`), so entries never
/// expire on their own.
#[derive(Clone)]
pub struct RedisCacheService {
    pool: Arc<Pool>,
}

impl RedisCacheService {
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Builds a pool from configuration.
    ///
    /// The pool connects lazily; an unreachable server surfaces on first use.
    pub fn from_config(config: &RedisConfig) -> WayfarerResult<Self> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| WayfarerError::Configuration(format!("Invalid Redis config: {e}")))?
            .max_size(config.pool_size as usize)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| WayfarerError::Cache(format!("Failed to create Redis pool: {e}")))?;

        info!("Redis pool created (max size {})", config.pool_size);
        Ok(Self::new(Arc::new(pool)))
    }

    async fn conn(&self) -> WayfarerResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| WayfarerError::Cache(format!("Failed to get Redis connection: {e}")))
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> WayfarerResult<Option<String>> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| WayfarerError::Cache(format!("Failed to get key '{key}': {e}")))?;

        debug!(key, hit = value.is_some(), "cache lookup");
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str) -> WayfarerResult<()> {
        let mut conn = self.conn().await?;
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| WayfarerError::Cache(format!("Failed to set key '{key}': {e}")))?;

        debug!(key, "cached");
        Ok(())
    }

    async fn set_raw_if_absent(&self, key: &str, value: &str) -> WayfarerResult<bool> {
        let mut conn = self.conn().await?;
        let written: bool = conn
            .set_nx(key, value)
            .await
            .map_err(|e| WayfarerError::Cache(format!("Failed to set key '{key}': {e}")))?;

        debug!(key, written, "cached if absent");
        Ok(written)
    }

    async fn delete(&self, key: &str) -> WayfarerResult<bool> {
        let mut conn = self.conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| WayfarerError::Cache(format!("Failed to delete key '{key}': {e}")))?;

        debug!(key, deleted, "cache invalidated");
        Ok(deleted > 0)
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        let mut conn = match self.conn().await {
            Ok(conn) => conn,
            Err(e) => return HealthStatus::Unhealthy(e.to_string()),
        };

        let pong = redis::cmd("PING").query_async::<String>(&mut *conn).await;
        match pong {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(format!("Redis ping failed: {e}")),
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheService")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}
