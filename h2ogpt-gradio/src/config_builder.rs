//! Builder for [`ClientConfig`]

use crate::config::ClientConfig;
use std::time::Duration;

/// Builder for client configuration
#[derive(Default)]
pub struct ClientConfigBuilder {
    server_url: Option<String>,
    hf_token: Option<String>,
    hub_url: Option<String>,
    connect_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server URL or Space id
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the Hugging Face token
    pub fn hf_token(mut self, token: impl Into<String>) -> Self {
        self.hf_token = Some(token.into());
        self
    }

    /// Set the Hub used for Space resolution
    pub fn hub_url(mut self, url: impl Into<String>) -> Self {
        self.hub_url = Some(url.into());
        self
    }

    /// Set the TCP connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            server_url: self.server_url.unwrap_or(defaults.server_url),
            hf_token: self.hf_token,
            hub_url: self.hub_url.unwrap_or(defaults.hub_url),
            connect_timeout: self.connect_timeout,
        }
    }
}
