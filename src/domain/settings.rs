//! Server settings read from a `[server]` section.

use std::net::SocketAddr;

use super::error::RestConfigError;
use crate::ports::config_source::ConfigSource;

pub const SETTINGS_SECTION: &str = "server";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:5000";
pub const DEFAULT_PREFIX: &str = "/config";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub listen: SocketAddr,
    pub prefix: String,
}

impl ServerSettings {
    /// Missing options take their defaults; a present but malformed `listen`
    /// address is an error.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, RestConfigError> {
        let listen = source.get(SETTINGS_SECTION, "listen", Some(DEFAULT_LISTEN))?;
        let prefix = source.get(SETTINGS_SECTION, "prefix", Some(DEFAULT_PREFIX))?;
        Ok(Self {
            listen: parse_listen(&listen)?,
            prefix,
        })
    }

    /// Apply command-line overrides on top of file settings.
    pub fn with_overrides(
        mut self,
        listen: Option<&str>,
        prefix: Option<&str>,
    ) -> Result<Self, RestConfigError> {
        if let Some(listen) = listen {
            self.listen = parse_listen(listen)?;
        }
        if let Some(prefix) = prefix {
            self.prefix = prefix.to_string();
        }
        Ok(self)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 5000)),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

fn parse_listen(value: &str) -> Result<SocketAddr, RestConfigError> {
    value.trim().parse().map_err(|_| RestConfigError::Parse {
        section: SETTINGS_SECTION.to_string(),
        option: "listen".to_string(),
        value: value.to_string(),
        target: "socket address",
    })
}
