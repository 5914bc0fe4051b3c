//! Gradio HTTP transport
//!
//! Implements the part of the Gradio API the client needs: the app
//! description at `GET /config`, used to map endpoint names to function
//! indices, one-shot predictions at `POST /run/<name>`, and the websocket
//! queue for functions the app marks as queued.

use crate::api::{self, normalize_api_name, EndpointTable};
use crate::config::ClientConfig;
use crate::constants::{CONFIG_PATH, RUN_PREFIX};
use crate::error::{connection_error, connection_failure, network_error};
use crate::queue::{self, QueueJob};
use crate::source::{self, Source, SpaceHost};
use async_trait::async_trait;
use h2ogpt_core::{Error, Result, Transport};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Connection to a Gradio app over HTTP
///
/// Holds the resolved base URL, the endpoint table fetched at construction
/// and one session hash for the lifetime of the connection. Nothing is
/// mutated after construction, so a single instance can serve concurrent
/// calls.
///
/// # Example
///
/// ```no_run
/// use h2ogpt_gradio::{ClientConfig, GradioHttp};
/// use h2ogpt_core::Transport;
///
/// # async fn example() -> Result<(), h2ogpt_core::Error> {
/// let config = ClientConfig::new("http://localhost:7860", None);
/// let transport = GradioHttp::connect(&config).await?;
/// let text = transport
///     .predict("/submit_nochat", vec![serde_json::json!("hello")])
///     .await?;
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
pub struct GradioHttp {
    base_url: String,
    headers: HeaderMap,
    connect_timeout: Option<Duration>,
    session_hash: String,
    endpoints: EndpointTable,
    client: reqwest::Client,
    // Built on first blocking use so async callers never create it
    blocking: OnceLock<reqwest::blocking::Client>,
}

impl GradioHttp {
    /// Resolve the server address and fetch the app description
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let headers = create_headers(config.hf_token.as_deref())?;
        let client = build_client(&headers, config.connect_timeout)?;

        let base_url = match Source::parse(&config.server_url)? {
            Source::Url(base_url) => base_url,
            Source::Space(space_id) => {
                let url = space_lookup_url(config, &space_id);
                let host: SpaceHost = get_json(&client, &url, &config.server_url).await?;
                space_base_url(&host)?
            }
        };
        let app_config = get_json(&client, &config_url(&base_url), &base_url).await?;

        Self::from_parts(base_url, headers, config.connect_timeout, app_config, client, None)
    }

    /// Blocking counterpart of [`GradioHttp::connect`]
    ///
    /// Must not be called from within an async runtime.
    pub fn connect_blocking(config: &ClientConfig) -> Result<Self> {
        let headers = create_headers(config.hf_token.as_deref())?;
        let blocking = build_blocking_client(&headers, config.connect_timeout)?;

        let base_url = match Source::parse(&config.server_url)? {
            Source::Url(base_url) => base_url,
            Source::Space(space_id) => {
                let url = space_lookup_url(config, &space_id);
                let host: SpaceHost = get_json_blocking(&blocking, &url, &config.server_url)?;
                space_base_url(&host)?
            }
        };
        let app_config = get_json_blocking(&blocking, &config_url(&base_url), &base_url)?;

        let client = build_client(&headers, config.connect_timeout)?;
        Self::from_parts(
            base_url,
            headers,
            config.connect_timeout,
            app_config,
            client,
            Some(blocking),
        )
    }

    fn from_parts(
        base_url: String,
        headers: HeaderMap,
        connect_timeout: Option<Duration>,
        app_config: Value,
        client: reqwest::Client,
        blocking: Option<reqwest::blocking::Client>,
    ) -> Result<Self> {
        let endpoints = EndpointTable::from_config(app_config).map_err(|e| {
            connection_failure(&base_url, format!("unexpected app description: {e}"))
        })?;
        if endpoints.is_empty() {
            warn!(base_url = %base_url, "app exposes no named endpoints");
        }
        info!(
            base_url = %base_url,
            gradio_version = endpoints.version().unwrap_or("unknown"),
            endpoints = endpoints.len(),
            "connected to Gradio app"
        );

        let lock = OnceLock::new();
        if let Some(blocking) = blocking {
            let _ = lock.set(blocking);
        }

        Ok(Self {
            base_url,
            headers,
            connect_timeout,
            session_hash: Uuid::new_v4().simple().to_string(),
            endpoints,
            client,
            blocking: lock,
        })
    }

    /// Base URL of the app, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoints fetched at construction
    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    /// Session hash sent with every call on this connection
    pub fn session_hash(&self) -> &str {
        &self.session_hash
    }

    fn run_url(&self, api_name: &str) -> String {
        format!(
            "{}/{RUN_PREFIX}{}",
            self.base_url,
            normalize_api_name(api_name)
        )
    }

    fn queue_request(&self) -> Result<Request> {
        let authorization = self.headers.get(AUTHORIZATION).map(HeaderValue::as_bytes);
        queue::join_request(&queue::queue_url(&self.base_url), authorization)
    }

    fn blocking_client(&self) -> Result<&reqwest::blocking::Client> {
        if let Some(client) = self.blocking.get() {
            return Ok(client);
        }
        let client = build_blocking_client(&self.headers, self.connect_timeout)?;
        Ok(self.blocking.get_or_init(move || client))
    }
}

#[async_trait]
impl Transport for GradioHttp {
    async fn predict(&self, api_name: &str, args: Vec<Value>) -> Result<String> {
        let endpoint = self.endpoints.endpoint(api_name)?;
        let name = normalize_api_name(api_name);

        if endpoint.queued {
            debug!(endpoint = %name, fn_index = endpoint.fn_index, "joining queue");
            let job = QueueJob::new(&name, endpoint.fn_index, &self.session_hash, args);
            return queue::join(self.queue_request()?, job).await;
        }

        let body = api::predict_body(args, endpoint.fn_index, &self.session_hash);
        debug!(endpoint = %name, fn_index = endpoint.fn_index, "submitting prediction");

        let response = self
            .client
            .post(self.run_url(&name))
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(network_error)?;

        debug!(endpoint = %name, status, "prediction finished");
        api::parse_prediction(&name, status, &text)
    }

    fn predict_blocking(&self, api_name: &str, args: Vec<Value>) -> Result<String> {
        let endpoint = self.endpoints.endpoint(api_name)?;
        let name = normalize_api_name(api_name);

        if endpoint.queued {
            debug!(endpoint = %name, fn_index = endpoint.fn_index, "joining queue");
            let job = QueueJob::new(&name, endpoint.fn_index, &self.session_hash, args);
            return queue::join_blocking(self.queue_request()?, job);
        }

        let body = api::predict_body(args, endpoint.fn_index, &self.session_hash);
        debug!(endpoint = %name, fn_index = endpoint.fn_index, "submitting blocking prediction");

        let response = self
            .blocking_client()?
            .post(self.run_url(&name))
            .json(&body)
            .send()
            .map_err(network_error)?;
        let status = response.status().as_u16();
        let text = response.text().map_err(network_error)?;

        debug!(endpoint = %name, status, "prediction finished");
        api::parse_prediction(&name, status, &text)
    }
}

/// Helper to create the headers sent with every request
pub fn create_headers(hf_token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = hf_token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::configuration(format!("Invalid Hugging Face token: {e}")))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn build_client(headers: &HeaderMap, connect_timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().default_headers(headers.clone());
    if let Some(timeout) = connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))
}

fn build_blocking_client(
    headers: &HeaderMap,
    connect_timeout: Option<Duration>,
) -> Result<reqwest::blocking::Client> {
    // The blocking client applies a 30s total timeout unless told otherwise
    let mut builder = reqwest::blocking::Client::builder()
        .default_headers(headers.clone())
        .timeout(None);
    if let Some(timeout) = connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))
}

fn space_base_url(host: &SpaceHost) -> Result<String> {
    let url = url::Url::parse(&host.host).map_err(|e| {
        Error::configuration(format!("Space resolved to invalid host {:?}: {e}", host.host))
    })?;
    source::base_url(&url)
}

fn space_lookup_url(config: &ClientConfig, space_id: &str) -> String {
    debug!(space = %space_id, "resolving Space host");
    source::space_host_url(&config.hub_url, space_id)
}

fn config_url(base_url: &str) -> String {
    format!("{base_url}/{CONFIG_PATH}")
}

/// Construction-time requests report failures against `origin`, the address
/// the caller gave
fn check_status(origin: &str, url: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(connection_failure(
            origin,
            format!("GET {url} returned HTTP {status}"),
        ))
    }
}

async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    origin: &str,
) -> Result<T> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| connection_error(origin, e))?;
    check_status(origin, url, response.status())?;
    response.json().await.map_err(|e| connection_error(origin, e))
}

fn get_json_blocking<T: DeserializeOwned>(
    client: &reqwest::blocking::Client,
    url: &str,
    origin: &str,
) -> Result<T> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| connection_error(origin, e))?;
    check_status(origin, url, response.status())?;
    response.json().map_err(|e| connection_error(origin, e))
}
