//! Mapping of transport failures onto the core error type

use h2ogpt_core::Error;
use tokio_tungstenite::tungstenite;

/// Failure while establishing the connection to `url`
pub fn connection_error(url: &str, error: reqwest::Error) -> Error {
    Error::Connection {
        url: url.to_string(),
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

/// Construction-time failure that carries no underlying error
pub fn connection_failure(url: &str, message: impl Into<String>) -> Error {
    Error::Connection {
        url: url.to_string(),
        message: message.into(),
        source: None,
    }
}

/// Failure while a call was in flight
pub fn network_error(error: reqwest::Error) -> Error {
    Error::Network {
        message: error.to_string(),
        source: Some(Box::new(error)),
    }
}

/// Failure reported by the remote endpoint
pub fn remote_error(endpoint: &str, status: Option<u16>, message: impl Into<String>) -> Error {
    Error::Remote {
        endpoint: endpoint.to_string(),
        status,
        message: message.into(),
    }
}

/// Failure on the queue websocket of `endpoint`
///
/// A rejected handshake carries the HTTP status and is reported as a remote
/// failure; everything else is a network failure.
pub fn socket_error(endpoint: &str, error: tungstenite::Error) -> Error {
    match error {
        tungstenite::Error::Http(response) => remote_error(
            endpoint,
            Some(response.status().as_u16()),
            format!("queue join rejected with HTTP {}", response.status()),
        ),
        other => Error::Network {
            message: other.to_string(),
            source: Some(Box::new(other)),
        },
    }
}
