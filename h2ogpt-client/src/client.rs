//! Connection to an h2oGPT server

use crate::completion::TextCompletion;
use h2ogpt_core::{Result, Transport};
use h2ogpt_gradio::{ClientConfig, GradioHttp};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Client for an h2oGPT server
///
/// Construction resolves the server and fetches its endpoint table, so an
/// unreachable or malformed address fails here rather than on the first call.
/// The client is cheap to clone; clones share the same connection.
///
/// # Examples
///
/// ```no_run
/// use h2ogpt_client::Client;
/// use h2ogpt_core::{PromptType, TextCompletionParams};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::connect("http://localhost:7860", None).await?;
///
/// let params = TextCompletionParams::builder("Why is the sky blue?")
///     .prompt_type(PromptType::Instruct)
///     .build();
/// let text = client.text_completion().create_async(&params).await?;
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Connect to `server_url`, blocking the current thread
    ///
    /// Must not be called from within an async runtime; use
    /// [`Client::connect`] there.
    pub fn new(server_url: impl Into<String>, hf_token: Option<&str>) -> Result<Self> {
        Self::from_config(&ClientConfig::new(server_url, hf_token))
    }

    /// Connect to `server_url`
    pub async fn connect(server_url: impl Into<String>, hf_token: Option<&str>) -> Result<Self> {
        Self::connect_with_config(&ClientConfig::new(server_url, hf_token)).await
    }

    /// Connect with a full configuration, blocking the current thread
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        debug!(?config, "connecting");
        let transport = GradioHttp::connect_blocking(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Connect with a full configuration
    pub async fn connect_with_config(config: &ClientConfig) -> Result<Self> {
        debug!(?config, "connecting");
        let transport = GradioHttp::connect(config).await?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Wrap an already established transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Text completion requests against this server
    pub fn text_completion(&self) -> TextCompletion<'_> {
        TextCompletion::new(self)
    }

    /// Invoke `api_name` and block until its text result is ready
    pub fn predict(&self, api_name: &str, args: Vec<Value>) -> Result<String> {
        self.transport.predict_blocking(api_name, args)
    }

    /// Invoke `api_name` and wait for its text result
    ///
    /// Dropping the future abandons the call; the client stays usable.
    pub async fn predict_async(&self, api_name: &str, args: Vec<Value>) -> Result<String> {
        self.transport.predict(api_name, args).await
    }
}
