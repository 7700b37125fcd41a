//! Default values shared across the workspace.

/// Path segment appended (once) to every configured base URL.
pub const API_ROOT: &str = "api/2.0/mlflow/";

/// Environment variable consulted when no base URL is configured explicitly.
pub const TRACKING_URI_ENV: &str = "MLFLOW_TRACKING_URI";

pub mod http {
    use std::time::Duration;

    /// Default connection timeout for the built-in transport.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent sent by the built-in transport.
    pub const USER_AGENT: &str = concat!("mlflow-rs/", env!("CARGO_PKG_VERSION"));

    /// Content type of every request body sent by the client.
    pub const JSON_CONTENT_TYPE: &str = "application/json";
}
