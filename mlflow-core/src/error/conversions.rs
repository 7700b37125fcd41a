//! Type Conversions for MlflowError
//!
//! This module contains From trait implementations for converting
//! common error types into MlflowError.

use super::types::{MlflowError, TransportErrorKind};

impl From<reqwest::Error> for MlflowError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else {
            TransportErrorKind::NetworkFailure
        };
        Self::Transport {
            kind,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for MlflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err)
    }
}
