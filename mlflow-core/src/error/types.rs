//! Core error types.

use std::fmt;
use thiserror::Error;

/// Error code returned when a resource with the given name already exists.
pub const RESOURCE_ALREADY_EXISTS: &str = "RESOURCE_ALREADY_EXISTS";

/// Error code returned when the requested resource does not exist.
pub const RESOURCE_DOES_NOT_EXIST: &str = "RESOURCE_DOES_NOT_EXIST";

/// Result alias used throughout the workspace.
pub type Result<T, E = MlflowError> = std::result::Result<T, E>;

/// Boxed underlying cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a request never produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// DNS, connect, TLS or I/O failure while talking to the server.
    NetworkFailure,
    /// The request context was cancelled before the call completed.
    Cancelled,
    /// The request context deadline (or the transport's own timeout) expired.
    Timeout,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkFailure => f.write_str("network failure"),
            Self::Cancelled => f.write_str("cancelled"),
            Self::Timeout => f.write_str("timeout"),
        }
    }
}

/// Why a successful response could not be delivered into its sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    /// Copying the body into a byte sink failed.
    StreamCopyFailed,
    /// The body was not valid JSON for the target type.
    MalformedBody,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreamCopyFailed => f.write_str("stream copy failed"),
            Self::MalformedBody => f.write_str("malformed body"),
        }
    }
}

/// An error returned by the MLflow API (HTTP status 4xx/5xx).
///
/// `error_code` is empty when the server did not answer with the structured
/// `{"error_code": ..., "message": ...}` shape; `message` then holds the raw body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status code of the response. Never read from the body.
    pub status_code: u16,
    /// Machine-readable error code, e.g. `RESOURCE_DOES_NOT_EXIST`.
    pub error_code: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    pub fn new(status_code: u16, error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            error_code: error_code.into(),
            message: message.into(),
        }
    }

    /// True when the body carried a structured error code.
    pub fn is_structured(&self) -> bool {
        !self.error_code.is_empty()
    }

    pub fn is_resource_does_not_exist(&self) -> bool {
        self.error_code == RESOURCE_DOES_NOT_EXIST
    }

    pub fn is_resource_already_exists(&self) -> bool {
        self.error_code == RESOURCE_ALREADY_EXISTS
    }
}

/// Errors returned by the MLflow client.
#[derive(Debug, Error)]
pub enum MlflowError {
    /// The client could not be configured (bad base URL, bad HTTP settings).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The request could not be built, e.g. its path escapes the API root.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request payload could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The call never produced a response.
    #[error("Transport error ({kind}): {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The server answered with status 4xx/5xx.
    #[error("API error {status}: {message}", status = .0.status_code, message = .0.message)]
    Api(#[from] ApiError),

    /// The server answered successfully but the body could not be delivered.
    #[error("Failed to decode response ({kind}): {message}")]
    Decode {
        kind: DecodeErrorKind,
        message: String,
    },
}

impl MlflowError {
    pub fn cancelled() -> Self {
        Self::Transport {
            kind: TransportErrorKind::Cancelled,
            message: "request context was cancelled".to_string(),
            source: None,
        }
    }

    pub fn timeout() -> Self {
        Self::Transport {
            kind: TransportErrorKind::Timeout,
            message: "request context deadline exceeded".to_string(),
            source: None,
        }
    }

    pub fn network(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self::Transport {
            kind: TransportErrorKind::NetworkFailure,
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub fn decode(kind: DecodeErrorKind, message: impl Into<String>) -> Self {
        Self::Decode {
            kind,
            message: message.into(),
        }
    }

    /// The API error record, if this is an API-level failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status code for API-level failures.
    pub fn status_code(&self) -> Option<u16> {
        self.api_error().map(|e| e.status_code)
    }

    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self {
            Self::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn decode_kind(&self) -> Option<DecodeErrorKind> {
        match self {
            Self::Decode { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.transport_kind() == Some(TransportErrorKind::Cancelled)
    }

    pub fn is_not_found(&self) -> bool {
        self.api_error()
            .is_some_and(|e| e.status_code == 404 || e.is_resource_does_not_exist())
    }

    /// Whether retrying the same call could reasonably succeed.
    ///
    /// The client never retries on its own; this only informs caller policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { kind, .. } => !matches!(kind, TransportErrorKind::Cancelled),
            Self::Api(e) => e.status_code == 429 || (500..600).contains(&e.status_code),
            _ => false,
        }
    }
}
