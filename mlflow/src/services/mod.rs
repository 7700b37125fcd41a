//! Resource groups of the MLflow API.
//!
//! Each service borrows the [`Client`](crate::Client) and maps one method to one
//! API call: build the request, run it through the transport core, unwrap the
//! response envelope.

mod artifacts;
mod experiments;
mod logged_models;
mod metrics;
mod model_versions;
mod registered_models;
mod runs;
mod users;

pub use artifacts::ArtifactService;
pub use experiments::ExperimentService;
pub use logged_models::LoggedModelService;
pub use metrics::MetricService;
pub use model_versions::ModelVersionService;
pub use registered_models::RegisteredModelService;
pub use runs::RunService;
pub use users::UserService;
