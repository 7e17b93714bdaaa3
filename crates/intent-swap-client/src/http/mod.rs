/*
[INPUT]:  Client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod backend;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod transport;

mod chains;
mod intents;
mod quote;
mod tokens;

pub use backend::{BackendRequest, BackendResponse, HttpBackend, ReqwestBackend, ScriptedBackend};
pub use client::{API_KEY_HEADER, ClientConfig, SwapClient};
pub use dispatch::{Dispatcher, QueryValue, RequestDescriptor};
pub use error::{
    ApiError, ConfigError, DECODE_FAILURE_CODE, FALLBACK_MESSAGE, Result, TRANSPORT_FAILURE_CODE,
    TransportFailure,
};
pub use pagination::{CURSOR_PARAM, PageStream, paginate};
pub use transport::{REQUEST_ID_HEADER, Transport, TransportRequest, TransportResult};
