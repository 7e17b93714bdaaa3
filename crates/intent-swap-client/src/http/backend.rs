/*
[INPUT]:  Fully-resolved HTTP requests (method, URL, headers, body bytes)
[OUTPUT]: Raw HTTP responses or transport failures
[POS]:    HTTP layer - pluggable network exchange (reqwest or scripted)
[UPDATE]: When changing how requests hit the wire or adding backends
*/

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::http::error::{ConfigError, TransportFailure};
use crate::types::HttpMethod;

/// Request handed to a backend, URL already resolved against the base address
#[derive(Debug, Clone)]
pub struct BackendRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl BackendRequest {
    /// Body decoded as JSON, for inspection in tests and logs
    pub fn json_body(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Response as produced by the network, body left undecoded
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: u16,
    pub status_text: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl BackendResponse {
    /// Empty response; status text defaults to the canonical reason phrase
    pub fn new(status: u16) -> Self {
        let status_text = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .map(str::to_string);
        Self {
            status,
            status_text,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Response carrying `body` serialized as JSON
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status)
            .with_header(CONTENT_TYPE.as_str(), "application/json")
            .with_body(body.to_string())
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_status_text(mut self, status_text: Option<&str>) -> Self {
        self.status_text = status_text.map(str::to_string);
        self
    }

    /// Add a header; invalid names or values are ignored
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }
}

/// Executes a single HTTP exchange
///
/// Implementations must not retry and must only fail when no HTTP response
/// was obtained; non-2xx statuses are ordinary responses.
#[async_trait]
pub trait HttpBackend: Send + Sync + fmt::Debug {
    async fn execute(&self, request: BackendRequest) -> Result<BackendResponse, TransportFailure>;
}

/// Default backend on top of a pooled reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: Client,
}

impl ReqwestBackend {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client, e.g. one with a proxy or custom roots
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: BackendRequest) -> Result<BackendResponse, TransportFailure> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let status_text = match response.extensions().get::<ReasonPhrase>() {
            Some(phrase) => Some(String::from_utf8_lossy(phrase.as_bytes()).into_owned()),
            None => status.canonical_reason().map(str::to_string),
        };

        // The status line has arrived; a body that cannot be read is treated as empty
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(err) => {
                debug!(status = status.as_u16(), error = %err, "failed to read response body");
                Vec::new()
            }
        };

        Ok(BackendResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body,
        })
    }
}

/// Backend replaying canned replies in call order
///
/// Every request is recorded so tests can assert on what was sent. Once the
/// script runs dry each further call fails as a transport failure.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<BackendResponse, TransportFailure>>>,
    requests: Mutex<Vec<BackendRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: BackendResponse) -> &Self {
        self.lock_replies().push_back(Ok(response));
        self
    }

    pub fn push_json(&self, status: u16, body: Value) -> &Self {
        self.push_response(BackendResponse::json(status, &body))
    }

    pub fn push_failure(&self, failure: TransportFailure) -> &Self {
        self.lock_replies().push_back(Err(failure));
        self
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn remaining(&self) -> usize {
        self.lock_replies().len()
    }

    fn lock_replies(
        &self,
    ) -> std::sync::MutexGuard<'_, VecDeque<Result<BackendResponse, TransportFailure>>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl HttpBackend for ScriptedBackend {
    async fn execute(&self, request: BackendRequest) -> Result<BackendResponse, TransportFailure> {
        let description = format!("{} {}", request.method, request.url);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        self.lock_replies().pop_front().unwrap_or_else(|| {
            Err(TransportFailure::Backend(format!(
                "no scripted response left for {description}"
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(url: &str) -> BackendRequest {
        BackendRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[test]
    fn test_response_defaults_to_canonical_reason() {
        assert_eq!(BackendResponse::new(404).status_text.as_deref(), Some("Not Found"));
        assert_eq!(BackendResponse::new(599).status_text, None);
    }

    #[test]
    fn test_status_text_override() {
        let custom = BackendResponse::new(418).with_status_text(Some("Quote Engine Offline"));
        assert_eq!(custom.status_text.as_deref(), Some("Quote Engine Offline"));
        assert_eq!(BackendResponse::new(404).with_status_text(None).status_text, None);
    }

    #[tokio::test]
    async fn test_scripted_backend_replays_in_order() {
        let backend = ScriptedBackend::new();
        backend
            .push_json(200, json!({ "n": 1 }))
            .push_json(500, json!({ "n": 2 }));

        let first = backend.execute(request("http://a/1")).await.expect("first");
        let second = backend.execute(request("http://a/2")).await.expect("second");
        let third = backend.execute(request("http://a/3")).await;

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 500);
        assert!(matches!(third, Err(TransportFailure::Backend(_))));
        assert_eq!(backend.call_count(), 3);
        assert_eq!(backend.requests()[1].url, "http://a/2");
        assert_eq!(backend.remaining(), 0);
    }
}
