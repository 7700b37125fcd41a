//! Error Handling Module
//!
//! This module provides the error types returned by every client call:
//! - `MlflowError`, the single error type surfaced to callers
//! - `ApiError`, the normalized record of an API-level failure
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use mlflow_core::error::{ApiError, MlflowError};
//!
//! let error = MlflowError::from(ApiError::new(404, "RESOURCE_DOES_NOT_EXIST", "not found"));
//! assert_eq!(error.status_code(), Some(404));
//! assert!(!error.is_retryable());
//! ```

mod conversions;
pub mod types;

pub use types::*;
