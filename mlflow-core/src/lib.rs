//! mlflow-core
//!
//! Transport core shared by every resource method of the MLflow client: endpoint
//! resolution, request encoding, execution with cancellation, error classification
//! and response decoding.
#![deny(unsafe_code)]

pub mod defaults;
pub mod error;
pub mod execution;
pub mod types;
pub mod utils;

pub use error::{ApiError, DecodeErrorKind, MlflowError, Result, TransportErrorKind};
pub use execution::{
    ApiRequest, BaseEndpoint, HttpExecutor, HttpMethod, JsonTarget, QueryParams, ResponseMeta,
    ResponseSink,
};
pub use types::{HttpConfig, HttpConfigBuilder, build_http_client};
pub use utils::cancel::RequestContext;
