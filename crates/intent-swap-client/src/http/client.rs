/*
[INPUT]:  Base address, default headers, timeouts, optional backend override
[OUTPUT]: Immutable ClientConfig and the SwapClient facade built from it
[POS]:    HTTP layer - client configuration and construction
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::http::backend::HttpBackend;
use crate::http::dispatch::Dispatcher;
use crate::http::error::{ApiError, ConfigError};
use crate::http::transport::Transport;

/// Header used to identify the integrator to the API
pub const API_KEY_HEADER: &str = "x-api-key";

const DEFAULT_USER_AGENT: &str = concat!("intent-swap-client/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    default_headers: HeaderMap,
    timeout: Duration,
    connect_timeout: Duration,
    backend: Option<Arc<dyn HttpBackend>>,
}

impl ClientConfig {
    /// Create a configuration for `base_url`; trailing slashes are stripped
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = base_url.as_ref().trim();
        let parsed = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
            default_headers,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            backend: None,
        })
    }

    /// Add a header sent with every request unless overridden per call
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ConfigError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConfigError::InvalidHeaderName(name.to_string()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| ConfigError::InvalidHeaderValue(name.to_string()))?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Identify the caller with an API key header
    pub fn with_api_key(self, api_key: &str) -> Result<Self, ConfigError> {
        self.with_header(API_KEY_HEADER, api_key)
    }

    /// Overall request timeout of the default backend
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connect timeout of the default backend
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Replace the reqwest backend, e.g. with a scripted one in tests
    pub fn with_backend(mut self, backend: Arc<dyn HttpBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn backend(&self) -> Option<Arc<dyn HttpBackend>> {
        self.backend.clone()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.default_headers.keys().map(HeaderName::as_str).collect();
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("default_headers", &header_names)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("custom_backend", &self.backend.is_some())
            .finish()
    }
}

/// Main client for the cross-chain swap API
///
/// Cheap to share behind a reference: every call is independent and the
/// configuration is read-only for the client's lifetime.
#[derive(Debug, Clone)]
pub struct SwapClient {
    dispatcher: Dispatcher,
}

impl SwapClient {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let transport = Transport::new(&config)?;
        Ok(Self {
            dispatcher: Dispatcher::new(transport),
        })
    }

    /// Shorthand for a client with default settings against `base_url`
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Self::new(ClientConfig::new(base_url)?)
    }

    /// Raw dispatcher, for endpoints without a dedicated method
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn base_url(&self) -> &str {
        self.dispatcher.transport().base_url()
    }
}

/// Turn the listed error statuses into `Ok(None)`, leaving other errors untouched
pub(crate) fn absent_on<T>(
    result: Result<T, ApiError>,
    statuses: &[u16],
) -> Result<Option<T>, ApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if statuses.contains(&err.status) => {
            debug!(status = err.status, message = %err.message, "treating response as absent");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_are_stripped() {
        let config = ClientConfig::new("https://api.example.test/base//").expect("config");
        assert_eq!(config.base_url(), "https://api.example.test/base");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://files.example.test"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_headers_and_api_key() {
        let config = ClientConfig::new("https://api.example.test")
            .expect("config")
            .with_api_key("secret")
            .expect("api key");

        assert_eq!(config.default_headers().get(API_KEY_HEADER).unwrap(), "secret");
        assert!(config.default_headers().contains_key(USER_AGENT));
        assert!(matches!(
            config.clone().with_header("bad header", "x"),
            Err(ConfigError::InvalidHeaderName(_))
        ));
        assert!(matches!(
            config.with_header("x-ok", "line\nbreak"),
            Err(ConfigError::InvalidHeaderValue(_))
        ));
    }

    #[test]
    fn test_client_with_default_backend() {
        let client = SwapClient::with_base_url("http://localhost:8080/").expect("client");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_absent_on_only_listed_statuses() {
        let err = |status| ApiError {
            status,
            code: None,
            message: "x".to_string(),
            details: None,
            request_id: None,
            cause: None,
        };

        assert_eq!(absent_on(Ok(1), &[404]).expect("ok"), Some(1));
        assert_eq!(absent_on::<u8>(Err(err(404)), &[404]).expect("absent"), None);
        assert_eq!(absent_on::<u8>(Err(err(400)), &[400, 404]).expect("absent"), None);
        assert_eq!(
            absent_on::<u8>(Err(err(400)), &[404]).expect_err("propagates").status,
            400
        );
        assert_eq!(
            absent_on::<u8>(Err(err(0)), &[400, 404]).expect_err("propagates").status,
            0
        );
    }

    #[test]
    fn test_timeouts_default_and_override() {
        let config = ClientConfig::new("https://api.example.test").expect("config");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));

        let config = config
            .with_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(2));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout(), Duration::from_secs(2));
    }
}
