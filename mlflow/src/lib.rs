//! # mlflow
//!
//! Typed async client for the MLflow tracking and model registry REST API.
//!
//! Every call takes a [`RequestContext`] (cancellation + optional deadline) and
//! goes through a single transport core, so errors, logging and body handling are
//! the same for every resource.
//!
//! ```rust,no_run
//! use mlflow::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MlflowError> {
//!     let client = Client::new("http://localhost:5000")?;
//!     let ctx = RequestContext::background();
//!
//!     let experiment_id = client.experiments().create(&ctx, "demo").await?;
//!     let run = client
//!         .runs()
//!         .create(&ctx, &experiment_id, "first-run", None, [("team", "ml")])
//!         .await?;
//!
//!     if let Some(info) = run.and_then(|r| r.info) {
//!         client.runs().log_metric(&ctx, &info.run_id, "loss", 0.25, None, 1).await?;
//!         client
//!             .runs()
//!             .update(&ctx, &info.run_id, "", RunStatus::Finished, None)
//!             .await?;
//!     }
//!     Ok(())
//! }
//! ```
#![deny(unsafe_code)]

pub mod client;
pub mod services;
pub mod types;
mod utils;

pub use client::{Client, ClientBuilder};
pub use mlflow_core::{
    ApiError, ApiRequest, BaseEndpoint, DecodeErrorKind, HttpConfig, HttpConfigBuilder,
    HttpMethod, MlflowError, QueryParams, RequestContext, ResponseMeta, ResponseSink, Result,
    TransportErrorKind,
};
pub use mlflow_core::error::{RESOURCE_ALREADY_EXISTS, RESOURCE_DOES_NOT_EXIST};

/// Common imports.
pub mod prelude {
    pub use crate::client::{Client, ClientBuilder};
    pub use crate::types::*;
    pub use mlflow_core::{ApiError, HttpConfig, MlflowError, RequestContext};
}
