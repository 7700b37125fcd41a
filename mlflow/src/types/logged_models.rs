use serde::{Deserialize, Serialize};

use super::artifacts::FileInfo;
use super::metrics::Metric;

/// Lifecycle state of a logged model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoggedModelStatus {
    #[serde(rename = "LOGGED_MODEL_READY")]
    Ready,
    #[serde(rename = "LOGGED_MODEL_PENDING_REGISTRATION")]
    PendingRegistration,
    #[serde(rename = "LOGGED_MODEL_FAILED_REGISTRATION")]
    FailedRegistration,
    #[serde(rename = "LOGGED_MODEL_PENDING_DELETION")]
    PendingDeletion,
    #[serde(rename = "LOGGED_MODEL_DELETING")]
    Deleting,
    #[serde(rename = "LOGGED_MODEL_PENDING_FINALIZATION")]
    PendingFinalization,
    /// A state this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A model logged to an experiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggedModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<LoggedModelInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<LoggedModelData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggedModelInfo {
    pub model_id: String,
    pub experiment_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_timestamp_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LoggedModelStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    /// Flavor, e.g. `sklearn`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_run_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<LoggedModelTag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub registrations: Vec<LoggedModelRegistrationInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggedModelData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<LoggedModelParameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggedModelTag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggedModelParameter {
    pub key: String,
    pub value: String,
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for LoggedModelTag {
    fn from((key, value): (K, V)) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for LoggedModelParameter {
    fn from((key, value): (K, V)) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A model-registry version created from a logged model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggedModelRegistrationInfo {
    pub name: String,
    pub version: String,
}

/// Body of `POST logged-models`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateLoggedModelRequest {
    pub experiment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_run_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<LoggedModelParameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<LoggedModelTag>,
}

impl CreateLoggedModelRequest {
    pub fn new(experiment_id: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = Some(model_type.into());
        self
    }

    pub fn with_source_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.source_run_id = Some(run_id.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key, value).into());
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key, value).into());
        self
    }
}

/// Body of `logged-models/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchLoggedModelsRequest {
    /// Always sent, even when empty.
    pub experiment_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<LoggedModelOrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub datasets: Vec<LoggedModelSearchDataset>,
}

impl SearchLoggedModelsRequest {
    pub fn new<I, S>(experiment_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            experiment_ids: experiment_ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn order_by(mut self, order: LoggedModelOrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn with_page_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = Some(page_token.into());
        self
    }

    pub fn dataset(mut self, dataset: LoggedModelSearchDataset) -> Self {
        self.datasets.push(dataset);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoggedModelOrderBy {
    pub field_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_digest: Option<String>,
}

impl LoggedModelOrderBy {
    pub fn ascending(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ascending: Some(true),
            ..Default::default()
        }
    }

    pub fn descending(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ascending: Some(false),
            ..Default::default()
        }
    }
}

/// Restricts metric filters and ordering to one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoggedModelSearchDataset {
    pub dataset_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_digest: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLoggedModelsResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<LoggedModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Artifact listing of a logged model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggedModelArtifacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_uri: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
