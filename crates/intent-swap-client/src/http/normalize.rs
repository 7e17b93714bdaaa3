/*
[INPUT]:  TransportFailure, or a TransportResult whose status is outside 2xx
[OUTPUT]: Exactly one well-formed ApiError
[POS]:    Error handling layer - maps every failure onto the ApiError shape
[UPDATE]: When the server's error body format or fallback order changes
*/

use std::sync::Arc;

use serde_json::Value;

use crate::http::error::{
    ApiError, DECODE_FAILURE_CODE, FALLBACK_MESSAGE, TRANSPORT_FAILURE_CODE, TransportFailure,
};
use crate::http::transport::TransportResult;

impl ApiError {
    /// Error for a request that never produced an HTTP response
    pub fn from_transport_failure(failure: TransportFailure) -> Self {
        let message = failure.to_string();
        ApiError {
            status: 0,
            code: Some(TRANSPORT_FAILURE_CODE.to_string()),
            details: Some(Value::String(message.clone())),
            message,
            request_id: None,
            cause: Some(Arc::new(failure)),
        }
    }

    /// Error for a response whose status is outside 200..=299
    ///
    /// Message preference: body `message`, body `error`, status text, then a
    /// generic fallback. Code comes from body `code`, else body `name`.
    pub fn from_response(result: &TransportResult) -> Self {
        let body = result.body.as_ref();

        let message = body
            .and_then(|b| non_empty_str(b, "message"))
            .or_else(|| body.and_then(|b| non_empty_str(b, "error")))
            .or_else(|| result.status_text.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(FALLBACK_MESSAGE)
            .to_string();

        let code = body.and_then(|b| scalar_string(b, "code").or_else(|| scalar_string(b, "name")));

        let details = body.map(|b| match b.get("details") {
            Some(details) if !details.is_null() => details.clone(),
            _ => b.clone(),
        });

        ApiError {
            status: result.status,
            code,
            message,
            details,
            request_id: result.request_id().map(str::to_string),
            cause: None,
        }
    }

    /// Error for a 2xx body that does not decode into the expected type
    pub(crate) fn from_decode_failure(
        result: &TransportResult,
        error: &serde_json::Error,
    ) -> Self {
        ApiError {
            status: result.status,
            code: Some(DECODE_FAILURE_CODE.to_string()),
            message: format!("Failed to decode response body: {error}"),
            details: result.body.clone(),
            request_id: result.request_id().map(str::to_string),
            cause: None,
        }
    }
}

fn non_empty_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn scalar_string(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
