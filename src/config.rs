#![cfg(feature = "std")]

use std::fmt;
use std::net::SocketAddr;

use tokio::net::lookup_host;
use tokio::time::Duration;

use crate::core::config::{ACCEPT_POLL, DEFAULT_HOST, DEFAULT_PORT, READ_POLL};

/// Errors found while validating runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host did not resolve to any address.
    InvalidHost(String),
    /// A poll interval of zero would spin.
    ZeroPoll,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHost(host) => write!(f, "Invalid host address '{}'", host),
            ConfigError::ZeroPoll => write!(f, "Poll intervals must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for the hacker message server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single accept before the stop flag is rechecked.
    pub accept_poll: Duration,
    /// Upper bound on a single receive before the stop flag is rechecked.
    pub read_poll: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            accept_poll: ACCEPT_POLL,
            read_poll: READ_POLL,
        }
    }
}

impl ListenerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_polls(mut self, accept_poll: Duration, read_poll: Duration) -> Self {
        self.accept_poll = accept_poll;
        self.read_poll = read_poll;
        self
    }

    /// Reject settings that can never work, before any lookup is done.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.accept_poll.is_zero() || self.read_poll.is_zero() {
            return Err(ConfigError::ZeroPoll);
        }
        Ok(())
    }

    /// Resolve the host, which may be a name or an IP literal, and return the
    /// first address found.
    pub async fn resolve(&self) -> Result<SocketAddr, ConfigError> {
        self.validate()?;
        let invalid = || ConfigError::InvalidHost(self.host.clone());
        let mut addrs = lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                log::debug!("lookup of {} failed: {}", self.host, e);
                invalid()
            })?;
        addrs.next().ok_or_else(invalid)
    }
}

impl fmt::Display for ListenerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
