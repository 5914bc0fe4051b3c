//! High-level client API for h2oGPT servers
//!
//! [`Client`] holds the connection; [`TextCompletion`] issues requests to
//! the server's non-chat endpoint, either blocking or async.

#![warn(missing_docs)]

mod client;
mod completion;

pub use client::Client;
pub use completion::TextCompletion;

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::{Client, TextCompletion};
    pub use h2ogpt_core::{Error, LangChainMode, PromptType, Result, TextCompletionParams};
    pub use h2ogpt_gradio::ClientConfig;
}
