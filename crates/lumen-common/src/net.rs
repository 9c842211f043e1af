//! Fetching documents and stylesheets.
//!
//! The pipeline talks to the network only through the [`Fetch`] trait: one
//! call per document and one per linked stylesheet. [`HttpFetcher`] is the
//! blocking implementation used by the CLI; tests substitute an in-memory one.

use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use base64::Engine;
use thiserror::Error;

use crate::url::scheme_of;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors produced while fetching a resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client failed to build or the request failed in transit.
    #[error("request for {url} failed: {source}")]
    Http {
        /// The requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("{url} answered with HTTP status {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The status code received.
        status: u16,
    },
    /// A `file:` URL could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The filesystem path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A `data:` URL was malformed.
    #[error("invalid data URL: {0}")]
    DataUrl(String),
    /// The URL scheme is not one we know how to fetch.
    #[error("unsupported URL scheme in '{0}'")]
    UnsupportedScheme(String),
}

/// The result of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code (200 for `file:` and `data:` URLs).
    pub status: u16,
    /// Response headers with lowercased names.
    pub headers: HashMap<String, String>,
    /// Response body decoded as text.
    pub body: String,
}

impl Response {
    /// A 200 response with no headers.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            body: body.into(),
        }
    }
}

/// The fetch collaborator the pipeline depends on.
pub trait Fetch {
    /// Fetch `url` and return its body.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the resource cannot be retrieved.
    fn fetch(&self, url: &str) -> Result<Response, FetchError>;
}

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Value of the `User-Agent` request header.
    pub user_agent: String,
    /// Total request timeout.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking fetcher for `http`, `https`, `file` and `data` URLs.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a fetcher with the given settings.
    #[must_use]
    pub const fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    fn fetch_http(&self, url: &str) -> Result<Response, FetchError> {
        let http_error = |source: reqwest::Error| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(http_error)?;

        let response = client
            .get(url)
            .header("User-Agent", self.config.user_agent.as_str())
            .send()
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let body = response.text().map_err(http_error)?;
        Ok(Response {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Response, FetchError> {
        log::debug!(target: "lumen::net", "fetching {url}");
        match scheme_of(url).as_deref() {
            Some("http" | "https") => self.fetch_http(url),
            Some("file") => {
                let path = url.trim_start_matches("file://");
                fs::read_to_string(path)
                    .map(Response::ok)
                    .map_err(|source| FetchError::Io {
                        path: path.to_string(),
                        source,
                    })
            }
            Some("data") => {
                let bytes = decode_data_url(url)?;
                Ok(Response::ok(String::from_utf8_lossy(&bytes).into_owned()))
            }
            Some("about") => Ok(Response::ok(String::new())),
            _ => Err(FetchError::UnsupportedScheme(url.to_string())),
        }
    }
}

/// Decode the payload of a `data:` URL into raw bytes.
///
/// Base64 payloads (`;base64` metadata) are decoded; any other payload is
/// returned as written.
///
/// # Errors
///
/// Returns [`FetchError::DataUrl`] if the comma separator is missing or the
/// base64 payload is invalid.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, FetchError> {
    let data_url = url.trim_start_matches("data:");
    let Some((metadata, data)) = data_url.split_once(',') else {
        return Err(FetchError::DataUrl("missing comma".to_string()));
    };

    if metadata.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| FetchError::DataUrl(format!("base64 decode error: {e}")))
    } else {
        Ok(data.as_bytes().to_vec())
    }
}
