//! Shared MySQL pool.

use async_trait::async_trait;
use sqlx::{
    mysql::{MySqlPool, MySqlPoolOptions},
    Connection,
};
use tracing::{info, warn};
use wayfarer_config::DatabaseConfig;
use wayfarer_core::{HealthCheck, HealthStatus, WayfarerError, WayfarerResult};

/// Connection pool used by every MySQL repository.
///
/// Opened once at start-up and closed at shutdown; queries borrow a
/// connection only for their own duration.
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connects eagerly so a bad URL fails start-up instead of the first request.
    pub async fn new(config: &DatabaseConfig) -> WayfarerResult<Self> {
        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!(error = %e, "MySQL unreachable");
                WayfarerError::Database(format!("connect failed: {e}"))
            })?;

        info!(
            max_connections = config.max_connections,
            "MySQL pool ready"
        );
        Ok(Self { pool })
    }

    #[must_use]
    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Applies `migrations/` (users, itineraries).
    pub async fn run_migrations(&self) -> WayfarerResult<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| WayfarerError::Database(format!("migration failed: {e}")))?;
        info!("schema up to date");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("MySQL pool closed");
    }
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        let mut conn = match self.pool.acquire().await {
            Ok(conn) => conn,
            Err(e) => return HealthStatus::Unhealthy(e.to_string()),
        };
        match conn.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .finish()
    }
}
