//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, info, warn};
use wayfarer_core::{WayfarerError, WayfarerResult};

/// Environment variable selecting the environment-specific config file.
pub const ENVIRONMENT_VAR: &str = "WAYFARER_ENV";

/// Loads [`AppConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates configuration from `config_dir`.
    ///
    /// Sources are applied in order, later ones overriding earlier ones:
    /// 1. built-in defaults
    /// 2. `{config_dir}/default.toml`
    /// 3. `{config_dir}/{environment}.toml`
    /// 4. `{config_dir}/local.toml`
    /// 5. environment variables such as `WAYFARER__SERVER__PORT`
    pub fn load(config_dir: impl AsRef<Path>) -> WayfarerResult<AppConfig> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let config = Self::build(config_dir.as_ref(), &environment)?;
        let mut app_config: AppConfig = config.try_deserialize().map_err(config_error)?;
        app_config.app.environment = environment;

        if let Err(errors) = ConfigValidator::validate(&app_config) {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(WayfarerError::Configuration(message));
        }

        if app_config.app.environment == "production"
            && app_config.security.jwt_secret == crate::SecurityConfig::default().jwt_secret
        {
            warn!("Using default JWT secret in production! This is a security risk.");
        }

        Ok(app_config)
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> WayfarerResult<AppConfig> {
        Self::load("./config")
    }

    fn build(config_dir: &Path, environment: &str) -> WayfarerResult<Config> {
        let defaults = Config::try_from(&AppConfig::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults);

        for name in ["default", environment, "local"] {
            let path = config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::with_name(&path.to_string_lossy()).required(false));
            }
        }

        builder
            .add_source(
                Environment::with_prefix("WAYFARER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error)
    }
}

fn config_error(err: ConfigError) -> WayfarerError {
    WayfarerError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.security.jwt_access_expiration_secs, 3600);
        assert!(config.redis.enabled);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 9000\n\n[redis]\nenabled = false\n",
        )
        .unwrap();

        let config = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(!config.redis.enabled);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_local_file_wins_over_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[server]\nport = 9000\n").unwrap();
        fs::write(dir.path().join("local.toml"), "[server]\nport = 9100\n").unwrap();

        let config = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[security]\njwt_secret = \"short\"\n").unwrap();

        let err = ConfigLoader::load(dir.path()).unwrap_err();
        assert!(matches!(err, WayfarerError::Configuration(ref m) if m.contains("JWT secret")));
    }
}
