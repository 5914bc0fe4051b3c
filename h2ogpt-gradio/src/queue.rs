//! Gradio queue protocol
//!
//! Queued functions cannot be called through `/run`. The client joins the
//! queue over a websocket at `/queue/join` and answers the server's prompts:
//!
//! 1. the server sends `send_hash`, the client answers with its function
//!    index and session hash;
//! 2. zero or more `estimation` updates report the queue position;
//! 3. the server sends `send_data`, the client answers with the arguments;
//! 4. `process_starts` and `process_generating` follow, and
//!    `process_completed` carries the output.
//!
//! [`QueueJob`] holds the protocol state and is shared by the async and
//! blocking runners, which only move frames.

use crate::api::{error_message, output_text};
use crate::constants::QUEUE_JOIN_PATH;
use crate::error::{remote_error, socket_error};
use futures::{SinkExt, StreamExt};
use h2ogpt_core::{Error, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(tag = "msg", rename_all = "snake_case")]
enum ServerMessage {
    SendHash,
    Estimation {
        #[serde(default)]
        rank: Option<u64>,
        #[serde(default)]
        queue_size: Option<u64>,
    },
    SendData,
    QueueFull,
    ProcessStarts,
    ProcessGenerating,
    ProcessCompleted {
        #[serde(default)]
        output: Value,
        #[serde(default)]
        success: bool,
    },
    #[serde(other)]
    Unknown,
}

/// What the runner does after handing a frame to [`QueueJob::on_message`]
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Send this text frame back
    Reply(String),
    /// Keep reading
    Wait,
    /// The job finished with this text output
    Done(String),
}

/// One call travelling through the queue
#[derive(Debug)]
pub(crate) struct QueueJob<'a> {
    endpoint: &'a str,
    fn_index: usize,
    session_hash: &'a str,
    data: Option<Vec<Value>>,
}

impl<'a> QueueJob<'a> {
    pub(crate) fn new(
        endpoint: &'a str,
        fn_index: usize,
        session_hash: &'a str,
        args: Vec<Value>,
    ) -> Self {
        Self {
            endpoint,
            fn_index,
            session_hash,
            data: Some(args),
        }
    }

    /// Advance the protocol with one text frame from the server
    pub(crate) fn on_message(&mut self, text: &str) -> Result<Step> {
        let message: ServerMessage = serde_json::from_str(text).map_err(|e| {
            Error::response(format!("unexpected queue message from {}: {e}", self.endpoint))
        })?;

        match message {
            ServerMessage::SendHash => Ok(Step::Reply(
                json!({
                    "fn_index": self.fn_index,
                    "session_hash": self.session_hash,
                })
                .to_string(),
            )),
            ServerMessage::SendData => {
                let data = self.data.take().ok_or_else(|| {
                    Error::response(format!("{} asked for the arguments twice", self.endpoint))
                })?;
                Ok(Step::Reply(
                    json!({
                        "data": data,
                        "event_data": null,
                        "fn_index": self.fn_index,
                        "session_hash": self.session_hash,
                    })
                    .to_string(),
                ))
            }
            ServerMessage::Estimation { rank, queue_size } => {
                debug!(endpoint = self.endpoint, ?rank, ?queue_size, "waiting in queue");
                Ok(Step::Wait)
            }
            ServerMessage::QueueFull => Err(remote_error(
                self.endpoint,
                None,
                "the server queue is full",
            )),
            ServerMessage::ProcessStarts
            | ServerMessage::ProcessGenerating
            | ServerMessage::Unknown => Ok(Step::Wait),
            ServerMessage::ProcessCompleted { output, success } => {
                if !success && error_message(&output).is_none() {
                    return Err(remote_error(
                        self.endpoint,
                        None,
                        "the job failed without an error message",
                    ));
                }
                output_text(self.endpoint, None, &output).map(Step::Done)
            }
        }
    }

    fn closed_early(&self) -> Error {
        Error::Network {
            message: format!("queue connection for {} closed before completion", self.endpoint),
            source: None,
        }
    }
}

/// Handshake request for `queue_url`, carrying the `Authorization` header if any
pub(crate) fn join_request(queue_url: &str, authorization: Option<&[u8]>) -> Result<Request> {
    let mut request = queue_url
        .into_client_request()
        .map_err(|e| Error::configuration(format!("invalid queue address {queue_url:?}: {e}")))?;
    if let Some(value) = authorization {
        let mut value = HeaderValue::from_bytes(value)
            .map_err(|e| Error::configuration(format!("Invalid Hugging Face token: {e}")))?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
    }
    Ok(request)
}

/// Run `job` to completion on a fresh websocket
pub(crate) async fn join(request: Request, mut job: QueueJob<'_>) -> Result<String> {
    let endpoint = job.endpoint;
    let (mut socket, _) = tokio_tungstenite::connect_async(request)
        .await
        .map_err(|e| socket_error(endpoint, e))?;

    while let Some(message) = socket.next().await {
        let text = match message.map_err(|e| socket_error(endpoint, e))? {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        match job.on_message(&text)? {
            Step::Reply(reply) => socket
                .send(Message::Text(reply))
                .await
                .map_err(|e| socket_error(endpoint, e))?,
            Step::Wait => {}
            Step::Done(output) => {
                // The output is already in hand
                let _ = socket.close(None).await;
                return Ok(output);
            }
        }
    }

    Err(job.closed_early())
}

/// Blocking counterpart of [`join`]
pub(crate) fn join_blocking(request: Request, mut job: QueueJob<'_>) -> Result<String> {
    let endpoint = job.endpoint;
    let (mut socket, _) = tungstenite::connect(request).map_err(|e| socket_error(endpoint, e))?;

    loop {
        let text = match socket.read() {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_))
            | Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                break
            }
            Ok(_) => continue,
            Err(e) => return Err(socket_error(endpoint, e)),
        };
        match job.on_message(&text)? {
            Step::Reply(reply) => socket
                .send(Message::Text(reply))
                .map_err(|e| socket_error(endpoint, e))?,
            Step::Wait => {}
            Step::Done(output) => {
                let _ = socket.close(None);
                return Ok(output);
            }
        }
    }

    Err(job.closed_early())
}

/// Websocket address of the queue for an `http(s)://` base URL
pub(crate) fn queue_url(base_url: &str) -> String {
    let rest = base_url.strip_prefix("http").unwrap_or(base_url);
    format!("ws{rest}/{QUEUE_JOIN_PATH}")
}
