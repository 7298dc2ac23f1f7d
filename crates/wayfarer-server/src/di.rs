//! Dependency wiring.
//!
//! Components are built once at start-up and handed to each other through
//! their constructors. The MySQL pool is shared by both repositories; the
//! cache is Redis when enabled and an in-process map otherwise.

use std::sync::Arc;
use tracing::info;
use wayfarer_config::{AppConfig, RedisConfig, SecurityConfig};
use wayfarer_core::{HealthCheck, WayfarerResult};
use wayfarer_repository::{
    DatabasePool, ItineraryRepository, MySqlItineraryRepository, MySqlUserRepository,
    UserRepository,
};
use wayfarer_rest::AppState;
use wayfarer_security::{PasswordHasher, TokenProvider};
use wayfarer_service::{
    AuthService, AuthServiceImpl, CacheInterface, InMemoryCacheService, ItineraryService,
    ItineraryServiceImpl, RedisCacheService,
};

/// The selected cache, viewed both as a cache and as a health check.
#[derive(Clone)]
pub struct CacheBackend {
    pub cache: Arc<dyn CacheInterface>,
    pub health: Arc<dyn HealthCheck>,
}

impl CacheBackend {
    /// Picks Redis or the in-process cache from configuration.
    pub fn from_config(config: &RedisConfig) -> WayfarerResult<Self> {
        if config.enabled {
            let redis = Arc::new(RedisCacheService::from_config(config)?);
            info!("Using Redis cache at {}", config.url);
            Ok(Self {
                cache: redis.clone(),
                health: redis,
            })
        } else {
            info!("Redis disabled; using in-process cache");
            Ok(Self::in_memory())
        }
    }

    /// An in-process cache.
    #[must_use]
    pub fn in_memory() -> Self {
        let memory = Arc::new(InMemoryCacheService::new());
        Self {
            cache: memory.clone(),
            health: memory,
        }
    }
}

/// Fully wired application components.
pub struct AppModule {
    db_pool: Arc<DatabasePool>,
    token_provider: Arc<TokenProvider>,
    auth_service: Arc<dyn AuthService>,
    itinerary_service: Arc<dyn ItineraryService>,
    cache_health: Arc<dyn HealthCheck>,
}

impl AppModule {
    /// Connects to MySQL, applies migrations if configured, selects the
    /// cache and wires the services.
    pub async fn build(config: &AppConfig) -> WayfarerResult<Self> {
        let db_pool = Arc::new(DatabasePool::new(&config.database).await?);
        if config.database.run_migrations {
            db_pool.run_migrations().await?;
        }

        let cache = CacheBackend::from_config(&config.redis)?;
        Ok(Self::wire(db_pool, cache, &config.security))
    }

    /// Wires services on top of an existing pool and cache.
    #[must_use]
    pub fn wire(db_pool: Arc<DatabasePool>, cache: CacheBackend, security: &SecurityConfig) -> Self {
        let token_provider = Arc::new(TokenProvider::new(security));
        let password_hasher = Arc::new(PasswordHasher::new());

        let user_repository: Arc<dyn UserRepository> =
            Arc::new(MySqlUserRepository::new(db_pool.clone()));
        let itinerary_repository: Arc<dyn ItineraryRepository> =
            Arc::new(MySqlItineraryRepository::new(db_pool.clone()));

        let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
            user_repository,
            password_hasher,
            token_provider.clone(),
        ));
        let itinerary_service: Arc<dyn ItineraryService> = Arc::new(ItineraryServiceImpl::new(
            itinerary_repository,
            cache.cache,
        ));

        Self {
            db_pool,
            token_provider,
            auth_service,
            itinerary_service,
            cache_health: cache.health,
        }
    }

    /// Builds the HTTP application state, including readiness probes.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.auth_service.clone(),
            self.itinerary_service.clone(),
            self.token_provider.clone(),
        )
        .with_health_check(self.db_pool.clone())
        .with_health_check(self.cache_health.clone())
    }

    /// Releases pooled connections.
    pub async fn shutdown(&self) {
        self.db_pool.close().await;
        info!("Database pool closed");
    }
}

impl std::fmt::Debug for AppModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppModule").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_redis_selects_in_memory_cache() {
        let config = RedisConfig {
            enabled: false,
            ..RedisConfig::default()
        };
        let backend = CacheBackend::from_config(&config).unwrap();

        backend.cache.set_raw("k", "v").await.unwrap();
        assert_eq!(backend.cache.get_raw("k").await.unwrap().as_deref(), Some("v"));
        assert!(backend.health.check().await.can_serve());
    }

    #[test]
    fn test_enabled_redis_builds_lazily() {
        let backend = CacheBackend::from_config(&RedisConfig::default()).unwrap();
        assert_eq!(backend.health.name(), "cache");
    }
}
