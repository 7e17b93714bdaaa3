/*
[INPUT]:  Error sources (transport failures, non-2xx responses, client construction)
[OUTPUT]: ApiError - the single failure shape crossing the client boundary
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// Code carried by every [`ApiError`] whose request never produced an HTTP response
pub const TRANSPORT_FAILURE_CODE: &str = "NetworkError";

/// Code carried by an [`ApiError`] raised when a 2xx body does not match the expected type
pub const DECODE_FAILURE_CODE: &str = "DecodeError";

/// Message used when neither the body nor the status line says anything useful
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// Failure of the network exchange itself: no HTTP response was obtained
#[derive(Error, Debug)]
pub enum TransportFailure {
    /// reqwest could not complete the exchange (DNS, connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request body could not be serialized to JSON
    #[error("Failed to encode request body: {0}")]
    Encode(Arc<serde_json::Error>),

    /// A per-call header could not be represented on the wire
    #[error("Invalid request header: {0}")]
    InvalidHeader(String),

    /// Failure reported by a custom backend
    #[error("{0}")]
    Backend(String),
}

/// Structured error returned by every failing client call
///
/// `status` is `0` when the request never reached the server; in that case
/// `code` is [`TRANSPORT_FAILURE_CODE`] and the underlying [`TransportFailure`]
/// is available through [`std::error::Error::source`].
#[derive(Error, Debug, Clone)]
#[error("API error (status {status}): {message}")]
pub struct ApiError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
    pub details: Option<Value>,
    pub request_id: Option<String>,
    #[source]
    pub(crate) cause: Option<Arc<TransportFailure>>,
}

impl ApiError {
    /// True when the request never produced an HTTP response
    pub fn is_transport_failure(&self) -> bool {
        self.status == 0
    }

    /// True for a 404 response
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Check if the failure is worth retrying by the caller
    ///
    /// This layer never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self.status, 0 | 408 | 429 | 500..=599)
    }

    /// Correlation id echoed by the server, if any
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Underlying transport failure for `status == 0` errors
    pub fn transport_failure(&self) -> Option<&TransportFailure> {
        self.cause.as_deref()
    }
}

/// Errors raised while building a client
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Base URL is not a parseable absolute URL
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Base URL uses something other than http or https
    #[error("Unsupported base URL scheme '{0}'")]
    UnsupportedScheme(String),

    /// Header name contains characters not allowed by HTTP
    #[error("Invalid header name '{0}'")]
    InvalidHeaderName(String),

    /// Header value contains characters not allowed by HTTP
    #[error("Invalid value for header '{0}'")]
    InvalidHeaderValue(String),

    /// reqwest client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
