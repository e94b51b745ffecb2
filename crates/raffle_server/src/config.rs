//! Server configuration read from environment variables.
//!
//! | Variable           | Default            |
//! |--------------------|--------------------|
//! | `RAFFLE_BIND`      | `127.0.0.1:<PORT>` |
//! | `PORT`             | `3000`             |
//! | `RAFFLE_DB_PATH`   | `raffle.db`        |
//! | `RAFFLE_LOG_DIR`   | unset (stderr log) |
//! | `RAFFLE_LOG_LEVEL` | build default      |

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_PATH: &str = "raffle.db";

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<String>,
    pub log_level: String,
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value `{}` for {}", self.value, self.variable)
    }
}

impl Error for ConfigError {}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind = match get("RAFFLE_BIND") {
            Some(value) => value.parse::<SocketAddr>().map_err(|_| ConfigError {
                variable: "RAFFLE_BIND",
                value,
            })?,
            None => {
                let port = match get("PORT") {
                    Some(value) => value.parse::<u16>().map_err(|_| ConfigError {
                        variable: "PORT",
                        value,
                    })?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::from((Ipv4Addr::LOCALHOST, port))
            }
        };

        Ok(Self {
            bind,
            db_path: get("RAFFLE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            log_dir: get("RAFFLE_LOG_DIR"),
            log_level: get("RAFFLE_LOG_LEVEL")
                .unwrap_or_else(|| raffle_core::default_log_level().to_string()),
        })
    }
}
