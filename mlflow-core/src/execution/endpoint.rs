//! Base endpoint resolution.
//!
//! A configured base URL such as `http://localhost:5000` is normalized once into
//! `http://localhost:5000/api/2.0/mlflow/`; every relative resource path is then
//! resolved against it and must stay underneath it.

use std::fmt;

use reqwest::Url;

use crate::defaults::API_ROOT;
use crate::error::MlflowError;

/// A validated base URL ending with the API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEndpoint {
    url: Url,
}

impl BaseEndpoint {
    /// Parse and normalize a raw base URL.
    ///
    /// Credentials embedded in the URL are kept and passed through to the transport.
    pub fn parse(raw: &str) -> Result<Self, MlflowError> {
        let mut url = Url::parse(raw.trim()).map_err(|e| {
            MlflowError::InvalidConfiguration(format!("Invalid base URL '{raw}': {e}"))
        })?;
        if url.cannot_be_a_base() {
            return Err(MlflowError::InvalidConfiguration(format!(
                "Base URL '{raw}' cannot be used as a base for API paths"
            )));
        }

        let mut path = url.path().to_string();
        if !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(API_ROOT);
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self { url })
    }

    /// The normalized base, always ending with `api/2.0/mlflow/`.
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Resolve a resource path against the base.
    ///
    /// Leading `/` are stripped so absolute paths land under the API root, and the
    /// path is always joined as a relative reference (`logged-models:batchGet` is a
    /// path, not a scheme). Results that leave the base are rejected.
    pub fn resolve(&self, relative_path: &str) -> Result<Url, MlflowError> {
        let relative = relative_path.trim_start_matches('/');
        let joined = self
            .url
            .join(&format!("./{relative}"))
            .map_err(|e| MlflowError::InvalidRequest(format!("Invalid path '{relative_path}': {e}")))?;

        if joined.origin() != self.url.origin() || !joined.path().starts_with(self.url.path()) {
            return Err(MlflowError::InvalidRequest(format!(
                "Path '{relative_path}' resolves outside of {}",
                self.url
            )));
        }
        Ok(joined)
    }
}

impl fmt::Display for BaseEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl std::str::FromStr for BaseEndpoint {
    type Err = MlflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
