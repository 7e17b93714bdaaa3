/*
[INPUT]:  RequestDescriptor (path, method, optional body/query/headers)
[OUTPUT]: Decoded success payload, or the normalized ApiError
[POS]:    HTTP layer - request dispatch pipeline on top of Transport
[UPDATE]: When changing query encoding, default headers or decode policy
*/

use std::fmt;
use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::http::error::{ApiError, Result, TransportFailure};
use crate::http::transport::{Transport, TransportRequest};
use crate::types::HttpMethod;

/// Scalar query parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{n}"),
            QueryValue::UInt(n) => write!(f, "{n}"),
            QueryValue::Float(n) => write!(f, "{n}"),
            QueryValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Str(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

macro_rules! query_value_from_int {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::$variant(value.into())
                }
            }
        )+
    };
}

query_value_from_int!(Int: i8, i16, i32, i64);
query_value_from_int!(UInt: u8, u16, u32, u64);

/// One logical API call, built per request
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: HttpMethod,
    path: String,
    body: Option<std::result::Result<Value, Arc<serde_json::Error>>>,
    query: Vec<(String, Option<QueryValue>)>,
    headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Serialize `body` as the JSON payload
    ///
    /// Serialization errors surface when the request is dispatched.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_value(body).map_err(Arc::new));
        self
    }

    pub fn query(self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.query_opt(key, Some(value))
    }

    /// Add a query parameter; `None` values are left out of the URL
    pub fn query_opt<V: Into<QueryValue>>(mut self, key: &str, value: Option<V>) -> Self {
        self.query.push((key.to_string(), value.map(Into::into)));
        self
    }

    /// Per-call header, replacing any default of the same name
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path with exactly one leading slash and the encoded query appended
    pub fn url_path(&self) -> String {
        let path = format!("/{}", self.path.trim_start_matches('/'));
        let query = encode_query(&self.query);
        if query.is_empty() {
            path
        } else {
            format!("{path}?{query}")
        }
    }

    fn into_transport_request(self) -> std::result::Result<TransportRequest, TransportFailure> {
        let path = self.url_path();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportFailure::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| TransportFailure::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        let body = self
            .body
            .transpose()
            .map_err(TransportFailure::Encode)?;

        Ok(TransportRequest {
            method: self.method,
            path,
            body,
            headers,
        })
    }
}

fn encode_query(query: &[(String, Option<QueryValue>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query {
        if let Some(value) = value {
            serializer.append_pair(key, &value.to_string());
        }
    }
    serializer.finish()
}

/// Percent-encode a value interpolated into a path segment
pub(crate) fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Turns descriptors into HTTP exchanges and decodes the results
#[derive(Debug, Clone)]
pub struct Dispatcher {
    transport: Transport,
}

impl Dispatcher {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Dispatch a request and decode its 2xx body into `T`
    ///
    /// A bodiless success decodes from JSON `null`, so `()` and `Option<_>`
    /// work for endpoints that may answer without content. The payload is not
    /// otherwise validated.
    pub async fn dispatch<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        let method = request.method();
        let path = request.url_path();
        debug!(%method, %path, "dispatching request");

        let transport_request = request
            .into_transport_request()
            .map_err(ApiError::from_transport_failure)?;

        let result = match self.transport.send(transport_request).await {
            Ok(result) => result,
            Err(failure) => {
                let err = ApiError::from_transport_failure(failure);
                warn!(%method, %path, error = %err, "transport failure");
                return Err(err);
            }
        };

        if !result.is_success() {
            let err = ApiError::from_response(&result);
            warn!(
                %method,
                %path,
                status = err.status,
                code = err.code.as_deref().unwrap_or("-"),
                request_id = err.request_id().unwrap_or("-"),
                "request failed"
            );
            return Err(err);
        }

        debug!(%method, %path, status = result.status, "request succeeded");
        let payload = result.body.clone().unwrap_or(Value::Null);
        serde_json::from_value(payload).map_err(|e| ApiError::from_decode_failure(&result, &e))
    }
}
