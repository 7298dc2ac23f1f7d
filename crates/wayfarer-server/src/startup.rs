//! Start-up log output.

use tracing::info;
use wayfarer_config::AppConfig;

const BANNER: &str = r"
 _       __            ____
| |     / /___ ___  __/ __/___ _________  _____
| | /| / / __ `/ / / / /_/ __ `/ ___/ _ \/ ___/
| |/ |/ / /_/ / /_/ / __/ /_/ / /  /  __/ /
|__/|__/\__,_/\__, /_/  \__,_/_/   \___/_/
             /____/
";

/// Banner plus the build and environment being started.
pub fn print_banner(config: &AppConfig) {
    info!("{BANNER}");
    info!(
        name = %config.app.name,
        version = %config.app.version,
        environment = %config.app.environment,
        cache = if config.redis.enabled { "redis" } else { "in-process" },
        "starting"
    );
}

/// Where the listener can be reached, once it is bound.
pub fn print_startup_info(addr: &str) {
    info!("REST API   http://{addr}/api");
    info!("Health     http://{addr}/health");
    info!("API docs   http://{addr}/swagger-ui");
}
