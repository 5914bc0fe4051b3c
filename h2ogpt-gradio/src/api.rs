//! Gradio application description and prediction payloads

use crate::error::remote_error;
use h2ogpt_core::{Error, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct AppConfig {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    enable_queue: bool,
    #[serde(default)]
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    // Gradio sends `false` for unnamed functions
    #[serde(default)]
    api_name: Value,
    // `null` inherits the app-wide `enable_queue`
    #[serde(default)]
    queue: Option<bool>,
}

/// A named function of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Position of the function in the app's dependency list
    pub fn_index: usize,
    /// Calls must go through the queue instead of `/run`
    pub queued: bool,
}

/// Named endpoints exposed by a Gradio app, keyed by `/name`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointTable {
    endpoints: HashMap<String, Endpoint>,
    version: Option<String>,
}

impl EndpointTable {
    /// Build the table from the body of `GET /config`
    pub fn from_config(value: Value) -> Result<Self> {
        let config: AppConfig = serde_json::from_value(value)?;
        let enable_queue = config.enable_queue;

        let endpoints = config
            .dependencies
            .iter()
            .enumerate()
            .filter_map(|(fn_index, dependency)| {
                let name = dependency.api_name.as_str().filter(|name| !name.is_empty())?;
                let endpoint = Endpoint {
                    fn_index,
                    queued: dependency.queue.unwrap_or(enable_queue),
                };
                Some((normalize_api_name(name), endpoint))
            })
            .collect();

        Ok(Self {
            endpoints,
            version: config.version,
        })
    }

    /// Endpoint serving `api_name`
    pub fn endpoint(&self, api_name: &str) -> Result<Endpoint> {
        let name = normalize_api_name(api_name);
        self.endpoints
            .get(&name)
            .copied()
            .ok_or(Error::EndpointNotFound(name))
    }

    /// Function index serving `api_name`
    pub fn fn_index(&self, api_name: &str) -> Result<usize> {
        self.endpoint(api_name).map(|endpoint| endpoint.fn_index)
    }

    /// Whether `api_name` is exposed
    pub fn contains(&self, api_name: &str) -> bool {
        self.endpoints.contains_key(&normalize_api_name(api_name))
    }

    /// Number of named endpoints
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether the app exposes no named endpoint
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Gradio version reported by the server
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// `/submit_nochat` and `submit_nochat` name the same endpoint
pub fn normalize_api_name(api_name: &str) -> String {
    if api_name.starts_with('/') {
        api_name.to_string()
    } else {
        format!("/{api_name}")
    }
}

/// Request body for a single prediction
pub(crate) fn predict_body(args: Vec<Value>, fn_index: usize, session_hash: &str) -> Value {
    json!({
        "data": args,
        "fn_index": fn_index,
        "session_hash": session_hash,
    })
}

/// Turn a prediction reply into the endpoint's text output
pub(crate) fn parse_prediction(endpoint: &str, status: u16, body: &str) -> Result<String> {
    let parsed = serde_json::from_str::<Value>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| format!("HTTP {status}: {body}"));
        return Err(remote_error(endpoint, Some(status), message));
    }

    let value = parsed?;
    output_text(endpoint, Some(status), &value)
}

/// Extract the text output from a reply or a completed queue job
pub(crate) fn output_text(endpoint: &str, status: Option<u16>, value: &Value) -> Result<String> {
    if let Some(message) = error_message(value) {
        return Err(remote_error(endpoint, status, message));
    }

    match value.get("data").and_then(Value::as_array) {
        Some(data) => match data.first() {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(other) => Err(Error::response(format!(
                "expected text output from {endpoint}, got {other}"
            ))),
            None => Err(Error::response(format!("{endpoint} returned no output"))),
        },
        None => Err(Error::response(format!(
            "{endpoint} reply has no data field"
        ))),
    }
}

pub(crate) fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Value {
        json!({
            "version": "3.35.2",
            "dependencies": [
                {"api_name": "submit"},
                {"api_name": false},
                {"api_name": "submit_nochat"},
                {},
                {"api_name": ""}
            ]
        })
    }

    #[test]
    fn test_endpoint_table_indexes_named_functions() {
        let table = EndpointTable::from_config(sample_config()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.fn_index("/submit").unwrap(), 0);
        assert_eq!(table.fn_index("/submit_nochat").unwrap(), 2);
        assert_eq!(table.fn_index("submit_nochat").unwrap(), 2);
        assert_eq!(table.version(), Some("3.35.2"));
    }

    #[test]
    fn test_queue_flags() {
        let table = EndpointTable::from_config(json!({
            "enable_queue": true,
            "dependencies": [
                {"api_name": "submit", "queue": false},
                {"api_name": "submit_nochat", "queue": null},
                {"api_name": "submit_nochat_api"}
            ]
        }))
        .unwrap();

        assert!(!table.endpoint("/submit").unwrap().queued);
        assert_eq!(
            table.endpoint("submit_nochat").unwrap(),
            Endpoint {
                fn_index: 1,
                queued: true
            }
        );
        assert!(table.endpoint("/submit_nochat_api").unwrap().queued);

        let table = EndpointTable::from_config(sample_config()).unwrap();
        assert!(!table.endpoint("/submit_nochat").unwrap().queued);
    }

    #[test]
    fn test_queue_can_be_forced_per_function() {
        let table = EndpointTable::from_config(json!({
            "enable_queue": false,
            "dependencies": [{"api_name": "submit_nochat", "queue": true}]
        }))
        .unwrap();
        assert!(table.endpoint("/submit_nochat").unwrap().queued);
    }

    #[test]
    fn test_unknown_endpoint() {
        let table = EndpointTable::from_config(sample_config()).unwrap();
        let err = table.fn_index("/chat").unwrap_err();
        assert!(matches!(err, Error::EndpointNotFound(name) if name == "/chat"));
    }

    #[test]
    fn test_config_without_dependencies() {
        let table = EndpointTable::from_config(json!({})).unwrap();
        assert!(table.is_empty());
        assert!(table.version().is_none());
    }

    #[test]
    fn test_config_with_wrong_shape() {
        let err = EndpointTable::from_config(json!({"dependencies": "nope"})).unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }

    #[test]
    fn test_predict_body() {
        let body = predict_body(vec![json!("a"), json!(1)], 2, "abc");
        assert_eq!(
            body,
            json!({"data": ["a", 1], "fn_index": 2, "session_hash": "abc"})
        );
    }

    #[test]
    fn test_parse_prediction_text() {
        let text = parse_prediction(
            "/submit_nochat",
            200,
            r#"{"data": ["Hi there"], "is_generating": false, "duration": 0.4}"#,
        )
        .unwrap();
        assert_eq!(text, "Hi there");
    }

    #[test]
    fn test_parse_prediction_error_field() {
        let err = parse_prediction("/submit_nochat", 200, r#"{"error": "boom"}"#).unwrap_err();
        match err {
            Error::Remote {
                endpoint,
                status,
                message,
            } => {
                assert_eq!(endpoint, "/submit_nochat");
                assert_eq!(status, Some(200));
                assert_eq!(message, "boom");
            }
            other => panic!("Expected Remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_prediction_http_failure() {
        let err = parse_prediction("/submit_nochat", 500, r#"{"error": null}"#).unwrap_err();
        assert!(matches!(err, Error::Remote { status: Some(500), .. }));

        let err = parse_prediction("/submit_nochat", 502, "Bad Gateway").unwrap_err();
        assert!(err.to_string().contains("HTTP 502: Bad Gateway"));
    }

    #[test]
    fn test_parse_prediction_unexpected_shapes() {
        let err = parse_prediction("/x", 200, r#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, Error::Response { .. }));

        let err = parse_prediction("/x", 200, r#"{"data": [42]}"#).unwrap_err();
        assert!(err.to_string().contains("expected text output"));

        let err = parse_prediction("/x", 200, r#"{"duration": 1}"#).unwrap_err();
        assert!(err.to_string().contains("no data field"));

        let err = parse_prediction("/x", 200, "not json").unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }
}
