//! Core types and traits for the h2oGPT client
//!
//! This crate holds the request model shared by the transport and client
//! crates: the error type, the prompt and retrieval enumerations, the
//! text completion parameters, and the [`Transport`] seam.

#![warn(missing_docs)]

pub mod error;
pub mod transport;
pub mod types;

// Re-export commonly used items
pub use error::{Error, Result};
pub use transport::Transport;
pub use types::{
    completion::{
        TextCompletionParams, TextCompletionParamsBuilder, LANGCHAIN_CHUNK_SIZE,
        LANGCHAIN_DOCUMENT_CHOICE, LANGCHAIN_ENABLE_CHUNK, LANGCHAIN_TOP_K_DOCS,
        SUBMIT_NOCHAT_API_NAME, SUBMIT_NOCHAT_ARITY,
    },
    langchain_mode::LangChainMode,
    prompt_type::PromptType,
};
