//! Text completion requests

use crate::client::Client;
use h2ogpt_core::{Result, TextCompletionParams, SUBMIT_NOCHAT_API_NAME};
use tracing::debug;

/// Issues non-chat text completions through a [`Client`]
///
/// Both call styles send the same positional arguments to the same endpoint;
/// they only differ in how the caller waits.
#[derive(Clone, Copy)]
pub struct TextCompletion<'a> {
    client: &'a Client,
}

impl<'a> TextCompletion<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create a completion, blocking until the server replies
    ///
    /// Must not be called from within an async runtime; use
    /// [`TextCompletion::create_async`] there.
    pub fn create(&self, params: &TextCompletionParams) -> Result<String> {
        debug!(
            prompt_type = %params.prompt_type,
            langchain_mode = %params.langchain_mode,
            "creating text completion"
        );
        self.client.predict(SUBMIT_NOCHAT_API_NAME, params.to_args())
    }

    /// Create a completion, yielding until the server replies
    pub async fn create_async(&self, params: &TextCompletionParams) -> Result<String> {
        debug!(
            prompt_type = %params.prompt_type,
            langchain_mode = %params.langchain_mode,
            "creating text completion"
        );
        self.client
            .predict_async(SUBMIT_NOCHAT_API_NAME, params.to_args())
            .await
    }
}
