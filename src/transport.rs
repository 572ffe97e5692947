//! HTTP transport used by the InmoStore client
//!
//! The client only ever issues `GET` requests and needs nothing beyond the
//! status code and the body text of the response, so the transport surface is
//! a single async method. [`ReqwestTransport`] is the default implementation;
//! tests and embedders can inject their own through
//! [`Client::with_transport`](crate::Client::with_transport).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Url;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Raw response handed back by a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Create a response from a status and a body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Coarse classification of transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// DNS failure, refused connection, TLS failure
    Connect,
    Timeout,
    /// The response body could not be read
    Body,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportErrorKind::Connect => "connection error",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Body => "body error",
            TransportErrorKind::Other => "transport error",
        };
        f.write_str(name)
    }
}

/// Failure reported by a [`Transport`] before a response was obtained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Other
        };
        // reqwest includes the full URL in its message; the API key is a path
        // segment, so only the error chain without the URL is kept.
        let message = err.without_url().to_string();
        Self { kind, message }
    }
}

/// Minimal HTTP GET capability the client depends on
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Issue a `GET` for `url` and return the status and body.
    ///
    /// Non-success statuses are returned as a normal [`HttpResponse`]; only
    /// failures to obtain a response at all are errors.
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;
}

/// Default [`Transport`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .timeout(timeout)
            .build()?;

        Ok(Self { http_client })
    }

    /// Wrap an existing `reqwest::Client`
    ///
    /// The `Accept: application/json` header is still added on every request.
    pub fn from_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        let response = self
            .http_client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
