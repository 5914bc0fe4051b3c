//! Resolution of the server address

use h2ogpt_core::{Error, Result};
use serde::Deserialize;
use url::Url;

/// Where the Gradio app lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A direct base URL, without trailing slash
    Url(String),
    /// A Hugging Face Space id, `owner/name`
    Space(String),
}

/// Reply of the Hub's Space host lookup
#[derive(Debug, Deserialize)]
pub(crate) struct SpaceHost {
    pub host: String,
}

impl Source {
    /// Classify `src` without touching the network
    pub fn parse(src: &str) -> Result<Self> {
        let src = src.trim();
        match Url::parse(src) {
            Ok(url) => Ok(Self::Url(base_url(&url)?)),
            Err(url::ParseError::RelativeUrlWithoutBase) if is_space_id(src) => {
                Ok(Self::Space(src.to_string()))
            }
            Err(e) => Err(Error::configuration(format!(
                "invalid server address {src:?}: {e}"
            ))),
        }
    }
}

/// Lookup URL returning the host of a Space
pub(crate) fn space_host_url(hub_url: &str, space_id: &str) -> String {
    format!("{}/api/spaces/{}/host", hub_url.trim_end_matches('/'), space_id)
}

/// Validate a URL and strip it down to a base without trailing slash
pub(crate) fn base_url(url: &Url) -> Result<String> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration(format!(
            "unsupported scheme {:?} in server address {url}, expected http or https",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(Error::configuration(format!(
            "server address {url} has no host"
        )));
    }
    // Routes are appended to the base, so `?__theme=dark` and `#x` must go
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    Ok(base.as_str().trim_end_matches('/').to_string())
}

fn is_space_id(src: &str) -> bool {
    let mut parts = src.split('/');
    let (Some(owner), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    [owner, name].iter().all(|part| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    })
}
