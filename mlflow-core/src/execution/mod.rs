//! Request Execution
//!
//! This module contains the transport core every resource method funnels through:
//! - Base endpoint resolution
//! - Request encoding and query composition
//! - Execution with cancellation and deadlines
//! - Response classification
//! - Error and result decoding

pub mod classify;
pub mod encoding;
pub mod endpoint;
pub mod errors;
pub mod executor;
pub mod query;
pub mod request;
pub mod sink;

pub use classify::{ResponseClass, classify_status};
pub use endpoint::BaseEndpoint;
pub use executor::{HttpExecutor, ResponseMeta};
pub use query::QueryParams;
pub use request::{ApiRequest, HttpMethod};
pub use sink::{JsonTarget, ResponseSink};
