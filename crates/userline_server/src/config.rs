//! Environment-driven server configuration.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use userline_core::{default_log_level, LoggingConfig};

pub const BIND_ADDR_ENV: &str = "USERLINE_BIND_ADDR";
pub const DATA_FILE_ENV: &str = "USERLINE_DATA_FILE";
pub const LOG_LEVEL_ENV: &str = "USERLINE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "USERLINE_LOG_DIR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATA_FILE: &str = "data/users.txt";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_file: PathBuf,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`; unset or blank values fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = value(BIND_ADDR_ENV)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .with_context(|| format!("{BIND_ADDR_ENV} must be a valid host:port"))?;

        let data_file = PathBuf::from(
            value(DATA_FILE_ENV).unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
        );

        let logging = LoggingConfig {
            level: value(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: value(LOG_DIR_ENV).map(PathBuf::from),
        };

        Ok(Self {
            bind_addr,
            data_file,
            logging,
        })
    }
}
