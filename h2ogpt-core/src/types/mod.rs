//! Core types used throughout the h2oGPT client

pub mod completion;
pub mod langchain_mode;
pub mod prompt_type;
