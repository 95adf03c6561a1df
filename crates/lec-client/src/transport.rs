//! Wire-level request/response exchange.
//!
//! The dispatcher only needs "send this method/path/body, give me a status
//! and a body", so the transport is a small trait. [`HttpTransport`] is the
//! reqwest implementation used by the console; tests plug in scripted
//! transports.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use lec_config::BackendConfig;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// HTTP method of a candidate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

/// One request as the dispatcher builds it. `path` is already rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Status and raw body of a settled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

impl WireResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Not-found and bad-request are read as "wrong endpoint or body shape".
    #[must_use]
    pub const fn is_shape_mismatch(&self) -> bool {
        matches!(self.status, 400 | 404)
    }

    /// Parse the body as JSON. Empty or non-JSON bodies yield `None`.
    #[must_use]
    pub fn json(&self) -> Option<serde_json::Value> {
        if self.body.trim().is_empty() {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }

    /// Short human-readable error text: a `message`/`error` field when the
    /// body is JSON, otherwise the (truncated) raw body.
    #[must_use]
    pub fn error_message(&self) -> String {
        if let Some(value) = self.json() {
            for key in ["message", "error", "detail", "msg"] {
                if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                    return text.to_string();
                }
            }
        }
        let raw = self.body.trim();
        if raw.is_empty() {
            return format!("HTTP {}", self.status);
        }
        raw.chars().take(200).collect()
    }
}

/// Sends one request and waits for it to settle.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &WireRequest,
    ) -> impl Future<Output = Result<WireResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: &WireRequest,
    ) -> impl Future<Output = Result<WireResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

/// reqwest-backed transport. Paths are appended to the configured base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from backend configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the reqwest client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &WireRequest) -> Result<WireResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.into(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        into_wire(builder.send().await?).await
    }
}

/// Read a reqwest response into a [`WireResponse`]. Status is never turned
/// into an error here; classification belongs to the dispatcher.
async fn into_wire(resp: reqwest::Response) -> Result<WireResponse, TransportError> {
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    Ok(WireResponse { status, body })
}
