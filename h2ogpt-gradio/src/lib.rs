//! Gradio transport for the h2oGPT client

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod config_builder;
pub mod constants;
pub mod error;
pub mod http;
mod queue;
pub mod source;


pub use api::{Endpoint, EndpointTable};
pub use config::ClientConfig;
pub use config_builder::ClientConfigBuilder;
pub use http::GradioHttp;
pub use source::Source;
