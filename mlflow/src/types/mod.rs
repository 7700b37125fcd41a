//! Request and response types.
//!
//! Field names match the MLflow wire format. Optional scalars are `Option`s and
//! collections default to empty, so partial responses always decode.

pub mod artifacts;
pub mod logged_models;
pub mod metrics;
pub mod model_versions;
pub mod permissions;
pub mod runs;
pub mod users;

pub use artifacts::*;
pub use logged_models::*;
pub use metrics::*;
pub use model_versions::*;
pub use permissions::*;
pub use runs::*;
pub use users::*;
