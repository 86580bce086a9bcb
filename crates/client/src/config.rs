//! Client configuration
//!
//! Both portal hosts and the request timeout are configurable so tests can
//! point the client at a mock server; defaults target production.

use std::time::Duration;

use tigris_domain::constants::{DEFAULT_API_BASE_URL, DEFAULT_PORTAL_BASE_URL};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::TigrisClient`] and the individual components.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the login portal (`https://www.tigrison.com`).
    pub portal_base_url: String,
    /// Base URL of the secondary API host (`https://api.tigris5240.com`).
    pub api_base_url: String,
    /// Per-request timeout applied by the underlying transport.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            portal_base_url: DEFAULT_PORTAL_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Override the portal host (login + index endpoints).
    pub fn with_portal_base_url(mut self, url: impl Into<String>) -> Self {
        self.portal_base_url = url.into();
        self
    }

    /// Override the secondary API host (SSO activation + calendar endpoints).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
