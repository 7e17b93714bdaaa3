/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public cross-chain swap client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

//! Typed client for a cross-chain swap and quote API.
//!
//! Calls go through one pipeline: [`Transport`] performs the HTTP exchange,
//! failures are normalized into [`ApiError`], the [`Dispatcher`] builds and
//! decodes requests, and listings are exposed as lazy [`PageStream`]s.
//! [`SwapClient`] wraps the pipeline with one method per remote operation.

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    ApiError,
    BackendRequest,
    BackendResponse,
    ClientConfig,
    ConfigError,
    Dispatcher,
    HttpBackend,
    PageStream,
    QueryValue,
    RequestDescriptor,
    ReqwestBackend,
    Result,
    ScriptedBackend,
    SwapClient,
    Transport,
    TransportFailure,
    TransportResult,
};

// Re-export all types
pub use types::*;
