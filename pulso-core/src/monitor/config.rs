//! Monitor configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::ConfigError;

/// Configuration for the polling monitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// Base URL of the scoring service.
    pub base_url: Url,

    /// Minutes between scheduled polls.
    #[serde(default = "default_poll_minutes")]
    pub poll_minutes: u64,

    /// Minimum minutes between two delivered alerts.
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u64,

    /// Seconds before an in-flight request is abandoned.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_poll_minutes() -> u64 {
    5
}

fn default_cooldown_minutes() -> u64 {
    15
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl MonitorConfig {
    /// Config with defaults for everything but the base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            poll_minutes: default_poll_minutes(),
            cooldown_minutes: default_cooldown_minutes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Validate and normalize. Misconfiguration here is fatal: the monitor
    /// must not start with a zero interval or an unusable base URL.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.poll_minutes == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.base_url.cannot_be_a_base()
            || !matches!(self.base_url.scheme(), "http" | "https")
        {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.to_string()));
        }

        // `Url::join` drops the last path segment unless the base path ends
        // in a slash.
        if !self.base_url.path().ends_with('/') {
            let path = format!("{}/", self.base_url.path());
            self.base_url.set_path(&path);
        }

        if self.request_timeout() >= self.poll_interval() {
            warn!("request timeout is not shorter than the poll interval");
        }

        Ok(self)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_minutes * 60)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_minutes * 60)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
