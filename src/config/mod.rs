//! Builds an `AppConfig` from layered sources:
//! `config/base.toml`, `config/{environment}.toml`, `APP_`-prefixed env variables and finally
//! the plain deployment variables (`PORT`, `NOCODB_API_URL`, `NOCODB_API_TOKEN`).
//!
//! The config is built once in `main` and handed down by reference.

mod error;
mod types;

use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use types::{AppConfig, Environment, NetConfig, StoreConfig};

/// Plain env variables understood for compatibility with existing deployments.
const DEPLOYMENT_VARS: [&str; 3] = ["PORT", "NOCODB_API_URL", "NOCODB_API_TOKEN"];

impl AppConfig {
    /// Loads the configuration from the `config` directory in the current working directory.
    /// The environment is selected with `APP_ENVIRONMENT` and defaults to `local`.
    pub fn load() -> ConfigResult<Self> {
        let config_dir = std::env::current_dir()?.join("config");
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()?;

        info!(
            "{:<20} - Loading the configuration for: {}",
            "config",
            environment.as_ref()
        );

        let config = Self::figment(&config_dir, environment).extract()?;
        Ok(config)
    }

    pub fn figment(config_dir: &Path, environment: Environment) -> Figment {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            // e.g. APP_STORE_CONFIG__PAGE_SIZE=50
            .merge(Env::prefixed("APP_").split("__"))
            .merge(
                Env::raw()
                    .only(&DEPLOYMENT_VARS)
                    .map(|key| match key.as_str().to_ascii_uppercase().as_str() {
                        "PORT" => "net_config.app_port".into(),
                        "NOCODB_API_URL" => "store_config.url".into(),
                        "NOCODB_API_TOKEN" => "store_config.auth_token".into(),
                        _ => key.as_str().to_owned().into(),
                    }),
            )
    }
}
