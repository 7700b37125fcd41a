//! Utilities.

pub mod cancel;

pub use cancel::RequestContext;
