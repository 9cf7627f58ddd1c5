//! The configuration structs used to build the AppConfig, and their impls.
use std::{net::SocketAddr, time::Duration};

use secrecy::SecretString;
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::ConfigError;

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub store_config: StoreConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
    /// Directory containing the `html/` templates.
    pub templates_dir: String,
}

/// Connection settings of the external record store holding the subscribers.
#[derive(Deserialize, Clone, Debug)]
pub struct StoreConfig {
    /// Records endpoint of the subscriber table.
    pub url: String,
    pub auth_token: SecretString,
    pub timeout_millis: u64,
    /// Number of records fetched by a single lookup. Records outside of this window are never found.
    pub page_size: u32,
}

// ###################################
// ->   IMPLs
// ###################################
impl NetConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.app_port))
    }

    pub fn templates_glob(&self) -> String {
        format!("{}/**/*", self.templates_dir.trim_end_matches('/'))
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::UnknownEnvironment(value)),
        }
    }
}
