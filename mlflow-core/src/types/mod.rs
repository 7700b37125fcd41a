//! Configuration types.

pub mod http;

pub use http::{HttpConfig, HttpConfigBuilder, build_http_client};
