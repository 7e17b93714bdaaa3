/*
[INPUT]:  Method, path (query included), optional JSON body, per-call headers
[OUTPUT]: TransportResult (status, best-effort JSON body, headers) or TransportFailure
[POS]:    HTTP layer - base transport over a pluggable backend
[UPDATE]: When changing header merging, body encoding or body decoding
*/

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, trace};

use crate::http::backend::{BackendRequest, HttpBackend, ReqwestBackend};
use crate::http::client::ClientConfig;
use crate::http::error::{ConfigError, TransportFailure};
use crate::types::HttpMethod;

/// Response header carrying the server's correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Request as seen by the transport; `path` already carries the query string
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

/// Outcome of an HTTP exchange that produced a response
#[derive(Debug, Clone)]
pub struct TransportResult {
    pub status: u16,
    pub status_text: Option<String>,
    /// `None` when the body was empty or not JSON
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl TransportResult {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
    }
}

/// Sends requests against the configured base address
#[derive(Debug, Clone)]
pub struct Transport {
    base_url: String,
    default_headers: HeaderMap,
    backend: Arc<dyn HttpBackend>,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let backend: Arc<dyn HttpBackend> = match config.backend() {
            Some(backend) => backend,
            None => Arc::new(ReqwestBackend::new(
                config.timeout(),
                config.connect_timeout(),
            )?),
        };

        Ok(Self {
            base_url: config.base_url().to_string(),
            default_headers: config.default_headers().clone(),
            backend,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one exchange; no retries, no caching
    ///
    /// Per-call headers replace default headers of the same name. POST and PUT
    /// bodies are sent as JSON with a JSON content-type unless one was given.
    pub async fn send(&self, request: TransportRequest) -> Result<TransportResult, TransportFailure> {
        let mut headers = self.default_headers.clone();
        headers.extend(request.headers);

        let body = if request.method.sends_body() {
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            }
            request
                .body
                .as_ref()
                .map(serde_json::to_vec)
                .transpose()
                .map_err(|e| TransportFailure::Encode(Arc::new(e)))?
        } else {
            None
        };

        let url = format!("{}{}", self.base_url, request.path);
        trace!(method = %request.method, %url, "sending request");

        let response = self
            .backend
            .execute(BackendRequest {
                method: request.method,
                url,
                headers,
                body,
            })
            .await?;

        Ok(TransportResult {
            status: response.status,
            status_text: response.status_text,
            body: decode_body(&response.body),
            headers: response.headers,
        })
    }
}

fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, len = bytes.len(), "response body is not JSON, treating as absent");
            None
        }
    }
}
