//! Error types for the h2oGPT client

use std::error::Error as StdError;
use thiserror::Error;

/// The main error type for all h2oGPT client operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The server address or client configuration is unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The connection could not be established
    #[error("Connection error ({url}): {message}")]
    Connection {
        /// Address the client tried to reach
        url: String,
        /// Error message
        message: String,
        /// Underlying error if available
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Transport failure while a call was in flight
    #[error("Network error: {message}")]
    Network {
        /// Error message
        message: String,
        /// Underlying error if available
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The remote endpoint reported a failure
    #[error("Remote error ({endpoint}): {message}")]
    Remote {
        /// Endpoint name, e.g. `/submit_nochat`
        endpoint: String,
        /// HTTP status, when the failure came with one
        status: Option<u16>,
        /// Error message reported by the server
        message: String,
    },

    /// The server does not expose the requested endpoint
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    /// A caller-supplied value was rejected before any network activity
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
        /// Underlying error if available
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The reply did not have the expected shape
    #[error("Response error: {message}")]
    Response {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a response error
    pub fn response(msg: impl Into<String>) -> Self {
        Self::Response {
            message: msg.into(),
        }
    }

    /// Whether the error was raised before anything was sent over the wire
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::Validation(_) | Self::EndpointNotFound(_)
        )
    }
}

/// Result type alias for h2oGPT client operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
