//! Configuration from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `PORT` | `3000` | TCP port to listen on |
//! | `HOST` | `0.0.0.0` | Address to bind |
//! | `LOG_FORMAT` | `pretty` | `pretty` or `json` |
//!
//! An unset or empty variable takes the default. `RUST_LOG` is read by
//! [`telemetry::init`](crate::telemetry::init), not here.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::Error;
use crate::telemetry::{LogConfig, LogFormat};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self { host: DEFAULT_HOST, port: DEFAULT_PORT, log: LogConfig::default() }
    }
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let var = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(port) = var("PORT") {
            config.port = port.trim().parse().map_err(|e| Error::Config {
                key: "PORT",
                reason: format!("`{port}`: {e}"),
            })?;
        }
        if let Some(host) = var("HOST") {
            config.host = host.trim().parse().map_err(|e| Error::Config {
                key: "HOST",
                reason: format!("`{host}`: {e}"),
            })?;
        }
        if let Some(format) = var("LOG_FORMAT") {
            config.log.format = format
                .parse::<LogFormat>()
                .map_err(|reason| Error::Config { key: "LOG_FORMAT", reason })?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
