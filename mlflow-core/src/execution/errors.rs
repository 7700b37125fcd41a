//! API error decoding.
//!
//! Error responses are expected to carry `{"error_code": ..., "message": ...}`.
//! Gateways and proxies in front of the tracking server often answer with HTML or
//! plain text instead, so anything that does not parse falls back to the raw body.

use serde_json::Value;

use crate::error::ApiError;

/// Build an `ApiError` from an error response.
///
/// `status` always comes from the response line. `reason` is the canonical reason
/// phrase, used only when the body is empty.
pub fn decode_api_error(status: u16, body: &[u8], reason: Option<&str>) -> ApiError {
    if let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) {
        let field = |name: &str| {
            fields
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let (error_code, message) = (field("error_code"), field("message"));
        if !(error_code.is_empty() && message.is_empty()) {
            return ApiError {
                status_code: status,
                error_code,
                message,
            };
        }
    }

    let text = String::from_utf8_lossy(body);
    let message = if text.trim().is_empty() {
        reason.map(str::to_string).unwrap_or_else(|| format!("HTTP {status}"))
    } else {
        tracing::warn!(status, "error response is not structured JSON; using raw body");
        text.into_owned()
    };

    ApiError {
        status_code: status,
        error_code: String::new(),
        message,
    }
}

/// Read an error response to completion and decode it.
///
/// The response is consumed, so its connection is released on every path.
pub async fn decode_error_response(resp: reqwest::Response) -> ApiError {
    let status = resp.status();
    let body = match resp.bytes().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!(error = %e, "failed to read error response body");
            return ApiError {
                status_code: status.as_u16(),
                error_code: String::new(),
                message: format!(
                    "Failed to read error response: {}",
                    status.canonical_reason().unwrap_or("unknown status")
                ),
            };
        }
    };
    decode_api_error(status.as_u16(), &body, status.canonical_reason())
}
