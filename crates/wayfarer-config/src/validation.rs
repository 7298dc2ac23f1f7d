//! Start-up validation of the loaded configuration.

use crate::AppConfig;
use std::fmt;
use url::Url;

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// JWT secret is too short to be safe for HS256.
    JwtSecretTooShort { actual: usize, minimum: usize },
    /// Port is not usable for binding.
    InvalidPort { name: String, value: u16 },
    /// Minimum pool size exceeds maximum.
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size is zero or too large.
    PoolSizeOutOfRange { name: String, value: u32, maximum: u32 },
    /// URL is malformed or uses the wrong scheme.
    InvalidUrl { url_type: String, message: String },
    /// A duration that must be positive is zero.
    NonPositiveTimeout { name: String, value: u64 },
    /// Log level is not recognized.
    InvalidLogLevel { value: String },
    /// Access tokens would outlive the allowed maximum.
    TokenLifetimeTooLong { value: u64, maximum: u64 },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JwtSecretTooShort { actual, minimum } => write!(
                f,
                "JWT secret too short: {actual} bytes (minimum {minimum})"
            ),
            Self::InvalidPort { name, value } => write!(f, "Invalid port for '{name}': {value}"),
            Self::InvalidPoolSize { min, max } => write!(
                f,
                "Invalid pool size: min_connections ({min}) > max_connections ({max})"
            ),
            Self::PoolSizeOutOfRange {
                name,
                value,
                maximum,
            } => write!(f, "Pool size '{name}' out of range: {value} (1..={maximum})"),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {url_type} URL: {message}")
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{name}' must be positive, got {value}")
            }
            Self::TokenLifetimeTooLong { value, maximum } => write!(
                f,
                "security.jwt_access_expiration_secs too long: {value} (maximum {maximum})"
            ),
            Self::InvalidLogLevel { value } => write!(
                f,
                "Invalid log level: '{value}' (valid: trace, debug, info, warn, error)"
            ),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Minimum JWT secret length for security.
    const MIN_JWT_SECRET_LENGTH: usize = 32;
    const MAX_TOKEN_LIFETIME_SECS: u64 = 30 * 24 * 60 * 60;
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns every problem found rather than stopping at the first one.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_security(config, &mut errors);
        Self::validate_server(config, &mut errors);
        Self::validate_database(config, &mut errors);
        Self::validate_redis(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_security(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let security = &config.security;
        if security.jwt_secret.len() < Self::MIN_JWT_SECRET_LENGTH {
            errors.push(ConfigValidationError::JwtSecretTooShort {
                actual: security.jwt_secret.len(),
                minimum: Self::MIN_JWT_SECRET_LENGTH,
            });
        }
        if security.jwt_access_expiration_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "security.jwt_access_expiration_secs".to_string(),
                value: 0,
            });
        } else if security.jwt_access_expiration_secs > Self::MAX_TOKEN_LIFETIME_SECS {
            errors.push(ConfigValidationError::TokenLifetimeTooLong {
                value: security.jwt_access_expiration_secs,
                maximum: Self::MAX_TOKEN_LIFETIME_SECS,
            });
        }
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: 0,
            });
        }
        if config.server.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_database(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let database = &config.database;
        match Url::parse(&database.url) {
            Ok(url) if url.scheme() == "mysql" => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: format!("unsupported scheme '{}', expected mysql://", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: e.to_string(),
            }),
        }

        if database.min_connections > database.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: database.min_connections,
                max: database.max_connections,
            });
        }
        if database.max_connections == 0 || database.max_connections > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeOutOfRange {
                name: "database.max_connections".to_string(),
                value: database.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
        if database.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_redis(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let redis = &config.redis;
        if !redis.enabled {
            return;
        }

        if !redis.url.starts_with("redis://") && !redis.url.starts_with("rediss://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: "URL must start with redis:// or rediss://".to_string(),
            });
        }
        if redis.pool_size == 0 || redis.pool_size > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeOutOfRange {
                name: "redis.pool_size".to_string(),
                value: redis.pool_size,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.observability.log_level.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_short_jwt_secret() {
        let mut config = AppConfig::default();
        config.security.jwt_secret = "secret".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::JwtSecretTooShort { actual: 6, .. })));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.database.url = "postgres://localhost/db".to_string();
        config.observability.log_level = "verbose".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_inverted_pool_bounds() {
        let mut config = AppConfig::default();
        config.database.min_connections = 50;
        config.database.max_connections = 10;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::InvalidPoolSize { min: 50, max: 10 }]
        );
    }

    #[test]
    fn test_redis_url_ignored_when_disabled() {
        let mut config = AppConfig::default();
        config.redis.url = "http://not-redis".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        config.redis.enabled = false;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_zero_token_lifetime() {
        let mut config = AppConfig::default();
        config.security.jwt_access_expiration_secs = 0;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors[0].to_string().contains("jwt_access_expiration_secs"));
    }

    #[test]
    fn test_token_lifetime_upper_bound() {
        let mut config = AppConfig::default();
        config.security.jwt_access_expiration_secs = ConfigValidator::MAX_TOKEN_LIFETIME_SECS;
        assert!(ConfigValidator::validate(&config).is_ok());

        config.security.jwt_access_expiration_secs = u64::MAX;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ConfigValidationError::TokenLifetimeTooLong { value: u64::MAX, .. }
        ));
    }
}
