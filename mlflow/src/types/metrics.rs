use serde::{Deserialize, Serialize};

/// One recorded metric value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    pub key: String,
    /// Always serialized; `0.0` is a legitimate value.
    pub value: f64,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub step: i64,
}

impl Metric {
    pub fn new(key: impl Into<String>, value: f64, timestamp: i64, step: i64) -> Self {
        Self {
            key: key.into(),
            value,
            timestamp,
            step,
        }
    }
}

/// Parameters for reading the history of one metric of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetMetricHistoryRequest {
    pub run_id: String,
    pub metric_key: String,
    pub max_results: Option<i32>,
    pub page_token: Option<String>,
}

impl GetMetricHistoryRequest {
    pub fn new(run_id: impl Into<String>, metric_key: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            metric_key: metric_key.into(),
            ..Default::default()
        }
    }

    pub fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_page_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = Some(page_token.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricHistory {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
