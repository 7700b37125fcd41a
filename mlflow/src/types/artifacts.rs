use serde::{Deserialize, Serialize};

/// Parameters for listing the artifacts of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArtifactsRequest {
    pub run_id: String,
    /// Directory relative to the artifact root; the root when unset.
    pub path: Option<String>,
    pub page_token: Option<String>,
}

impl ListArtifactsRequest {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_page_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = Some(page_token.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListArtifactsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_uri: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// A file or directory in an artifact store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    /// Path relative to the artifact root.
    pub path: String,
    pub is_dir: bool,
    /// Size in bytes; absent for directories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
}
