//! Gradio transport configuration

use crate::constants::{
    DEFAULT_SERVER_URL, HF_TOKEN_ENV, HF_TOKEN_LEGACY_ENV, HUB_URL_ENV, HUGGING_FACE_HUB_URL,
    SERVER_URL_ENV,
};
use std::env;
use std::fmt;
use std::time::Duration;

/// Configuration for connecting to an h2oGPT server
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server URL, or a Hugging Face Space id such as `h2oai/h2ogpt-chatbot`
    pub server_url: String,
    /// Hugging Face token, sent as a bearer credential
    pub hf_token: Option<String>,
    /// Hub used to resolve Space ids
    pub hub_url: String,
    /// Limit on establishing TCP connections; calls themselves are not timed out
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            hf_token: None,
            hub_url: HUGGING_FACE_HUB_URL.to_string(),
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for `server_url` with an optional token
    pub fn new(server_url: impl Into<String>, hf_token: Option<&str>) -> Self {
        Self {
            server_url: server_url.into(),
            hf_token: hf_token.map(str::to_string),
            ..Default::default()
        }
    }

    /// Create a new configuration builder
    pub fn builder() -> crate::config_builder::ClientConfigBuilder {
        crate::config_builder::ClientConfigBuilder::new()
    }

    /// Read the configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_url: non_empty_var(SERVER_URL_ENV).unwrap_or(defaults.server_url),
            hf_token: non_empty_var(HF_TOKEN_ENV).or_else(|| non_empty_var(HF_TOKEN_LEGACY_ENV)),
            hub_url: non_empty_var(HUB_URL_ENV).unwrap_or(defaults.hub_url),
            connect_timeout: None,
        }
    }
}

// Keeps the token out of logs
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_url", &self.server_url)
            .field("hf_token", &self.hf_token.as_ref().map(|_| "<redacted>"))
            .field("hub_url", &self.hub_url)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url, "http://localhost:7860");
        assert_eq!(config.hub_url, "https://huggingface.co");
        assert!(config.hf_token.is_none());
        assert!(config.connect_timeout.is_none());
    }

    #[test]
    fn test_new_keeps_token() {
        let config = ClientConfig::new("http://gpu-box:7860", Some("hf_abc"));
        assert_eq!(config.server_url, "http://gpu-box:7860");
        assert_eq!(config.hf_token.as_deref(), Some("hf_abc"));
        assert_eq!(config.hub_url, HUGGING_FACE_HUB_URL);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("http://gpu-box:7860", Some("hf_secret"));
        let debug = format!("{:?}", config);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("hf_secret"));
    }

    // Environment is process-wide: every from_env case lives in this one test
    #[test]
    fn test_from_env() {
        let vars = [SERVER_URL_ENV, HF_TOKEN_ENV, HF_TOKEN_LEGACY_ENV, HUB_URL_ENV];
        let clear = || vars.iter().for_each(|key| env::remove_var(key));

        clear();
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());

        env::set_var(HF_TOKEN_LEGACY_ENV, "hf_legacy");
        assert_eq!(ClientConfig::from_env().hf_token.as_deref(), Some("hf_legacy"));

        env::set_var(HF_TOKEN_ENV, " hf_current ");
        assert_eq!(ClientConfig::from_env().hf_token.as_deref(), Some("hf_current"));

        env::set_var(HF_TOKEN_ENV, "   ");
        assert_eq!(ClientConfig::from_env().hf_token.as_deref(), Some("hf_legacy"));

        env::set_var(SERVER_URL_ENV, "http://gpu-box:7860");
        env::set_var(HUB_URL_ENV, "http://hub.internal");
        let config = ClientConfig::from_env();
        assert_eq!(config.server_url, "http://gpu-box:7860");
        assert_eq!(config.hub_url, "http://hub.internal");
        assert!(config.connect_timeout.is_none());

        env::set_var(SERVER_URL_ENV, "");
        env::set_var(HUB_URL_ENV, " ");
        env::set_var(HF_TOKEN_LEGACY_ENV, "");
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());

        clear();
    }
}
