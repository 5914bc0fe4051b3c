//! h2oGPT - a Rust client for h2oGPT text-generation servers
//!
//! The server publishes its functions as a Gradio app. This crate connects to
//! it, builds the positional argument list of the non-chat submission
//! endpoint from typed parameters, and returns the generated text.
//!
//! # Quick Start
//!
//! ```no_run
//! use h2ogpt::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> std::result::Result<(), h2ogpt::Error> {
//! let client = Client::connect("http://localhost:7860", None).await?;
//!
//! let params = TextCompletionParams::builder("Write a haiku about rust")
//!     .prompt_type(PromptType::Instruct)
//!     .max_output_length(64)
//!     .build();
//! let text = client.text_completion().create_async(&params).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```
//!
//! Blocking code uses [`TextCompletion::create`] on a client built with
//! [`Client::new`] instead.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export core types
pub use h2ogpt_core::*;

#[cfg(feature = "gradio")]
#[cfg_attr(docsrs, doc(cfg(feature = "gradio")))]
pub mod gradio {
    //! Gradio transport
    pub use h2ogpt_gradio::*;
}

#[cfg(feature = "client")]
#[cfg_attr(docsrs, doc(cfg(feature = "client")))]
pub use h2ogpt_client::{Client, TextCompletion};

/// Prelude module for convenient imports
pub mod prelude {
    pub use h2ogpt_core::{Error, LangChainMode, PromptType, Result, TextCompletionParams};

    #[cfg(feature = "gradio")]
    pub use h2ogpt_gradio::ClientConfig;

    #[cfg(feature = "client")]
    pub use h2ogpt_client::{Client, TextCompletion};
}
