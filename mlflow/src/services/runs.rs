use mlflow_core::{ApiRequest, MlflowError, RequestContext};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::types::{
    DatasetInput, Run, RunData, RunInfo, RunStatus, RunTag, SearchRunsRequest, SearchRunsResponse,
};
use crate::utils::now_millis;

/// Runs: lifecycle, lookup, search and logging.
#[derive(Debug, Clone, Copy)]
pub struct RunService<'a> {
    client: &'a Client,
}

#[derive(Serialize)]
struct RunRef<'a> {
    run_id: &'a str,
}

#[derive(Serialize)]
struct RunKeyValue<'a> {
    run_id: &'a str,
    key: &'a str,
    value: &'a str,
}

#[derive(Default, Deserialize)]
struct RunResponse {
    #[serde(default)]
    run: Option<Run>,
}

#[derive(Serialize)]
struct CreateRunBody<'a> {
    experiment_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    run_name: Option<&'a str>,
    start_time: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<RunTag>,
}

#[derive(Serialize)]
struct UpdateRunBody<'a> {
    run_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    run_name: Option<&'a str>,
    status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time: Option<i64>,
}

#[derive(Serialize)]
struct LogMetricBody<'a> {
    run_id: &'a str,
    key: &'a str,
    value: f64,
    timestamp: i64,
    step: i64,
}

#[derive(Serialize)]
struct LogBatchBody<'a> {
    run_id: &'a str,
    #[serde(flatten)]
    data: &'a RunData,
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn check_finite(key: &str, value: f64) -> Result<(), MlflowError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MlflowError::InvalidRequest(format!(
            "metric '{key}' has non-finite value {value}"
        )))
    }
}

impl<'a> RunService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Start a run in an experiment.
    ///
    /// `start_time` is epoch milliseconds; `None` uses the current time. An empty
    /// `name` lets the server pick one.
    pub async fn create<I, K, V>(
        &self,
        ctx: &RequestContext,
        experiment_id: &str,
        name: &str,
        start_time: Option<i64>,
        tags: I,
    ) -> Result<Option<Run>, MlflowError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let body = CreateRunBody {
            experiment_id,
            run_name: non_empty(name),
            start_time: start_time.unwrap_or_else(now_millis),
            tags: tags.into_iter().map(RunTag::from).collect(),
        };
        let res: RunResponse = self
            .client
            .fetch(ctx, ApiRequest::post("runs/create").json(&body))
            .await?;
        Ok(res.run)
    }

    /// Change a run's status and name.
    ///
    /// Without an explicit `end_time`, terminal statuses are stamped with the current time.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        run_id: &str,
        name: &str,
        status: RunStatus,
        end_time: Option<i64>,
    ) -> Result<Option<RunInfo>, MlflowError> {
        #[derive(Default, Deserialize)]
        struct UpdateResponse {
            #[serde(default, alias = "run_info")]
            info: Option<RunInfo>,
        }

        let end_time = end_time.or_else(|| status.is_terminal().then(now_millis));
        let body = UpdateRunBody {
            run_id,
            run_name: non_empty(name),
            status,
            end_time,
        };
        let res: UpdateResponse = self
            .client
            .fetch(ctx, ApiRequest::post("runs/update").json(&body))
            .await?;
        Ok(res.info)
    }

    pub async fn delete(&self, ctx: &RequestContext, run_id: &str) -> Result<(), MlflowError> {
        self.client
            .send(ctx, ApiRequest::post("runs/delete").json(&RunRef { run_id }))
            .await
    }

    pub async fn restore(&self, ctx: &RequestContext, run_id: &str) -> Result<(), MlflowError> {
        self.client
            .send(ctx, ApiRequest::post("runs/restore").json(&RunRef { run_id }))
            .await
    }

    pub async fn get(&self, ctx: &RequestContext, run_id: &str) -> Result<Option<Run>, MlflowError> {
        let request = ApiRequest::get("runs/get").query_param("run_id", run_id);
        let res: RunResponse = self.client.fetch(ctx, request).await?;
        Ok(res.run)
    }

    pub async fn search(&self, ctx: &RequestContext, request: &SearchRunsRequest) -> Result<SearchRunsResponse, MlflowError> {
        self.client
            .fetch(ctx, ApiRequest::post("runs/search").json(request))
            .await
    }

    pub async fn set_tag(&self, ctx: &RequestContext, run_id: &str, key: &str, value: &str) -> Result<(), MlflowError> {
        let body = RunKeyValue { run_id, key, value };
        self.client
            .send(ctx, ApiRequest::post("runs/set-tag").json(&body))
            .await
    }

    pub async fn delete_tag(&self, ctx: &RequestContext, run_id: &str, key: &str) -> Result<(), MlflowError> {
        #[derive(Serialize)]
        struct Body<'a> {
            run_id: &'a str,
            key: &'a str,
        }

        self.client
            .send(ctx, ApiRequest::post("runs/delete-tag").json(&Body { run_id, key }))
            .await
    }

    /// Log one metric value. `timestamp` defaults to now (epoch milliseconds).
    ///
    /// NaN and infinite values have no JSON form and are rejected with `InvalidRequest`.
    pub async fn log_metric(
        &self,
        ctx: &RequestContext,
        run_id: &str,
        key: &str,
        value: f64,
        timestamp: Option<i64>,
        step: i64,
    ) -> Result<(), MlflowError> {
        check_finite(key, value)?;
        let body = LogMetricBody {
            run_id,
            key,
            value,
            timestamp: timestamp.unwrap_or_else(now_millis),
            step,
        };
        self.client
            .send(ctx, ApiRequest::post("runs/log-metric").json(&body))
            .await
    }

    pub async fn log_param(&self, ctx: &RequestContext, run_id: &str, key: &str, value: &str) -> Result<(), MlflowError> {
        let body = RunKeyValue { run_id, key, value };
        self.client
            .send(ctx, ApiRequest::post("runs/log-parameter").json(&body))
            .await
    }

    /// Log metrics, params and tags in one call. Non-finite metric values are rejected.
    pub async fn log_batch(&self, ctx: &RequestContext, run_id: &str, data: &RunData) -> Result<(), MlflowError> {
        for metric in &data.metrics {
            check_finite(&metric.key, metric.value)?;
        }
        let body = LogBatchBody { run_id, data };
        self.client
            .send(ctx, ApiRequest::post("runs/log-batch").json(&body))
            .await
    }

    pub async fn log_inputs(
        &self,
        ctx: &RequestContext,
        run_id: &str,
        datasets: &[DatasetInput],
    ) -> Result<(), MlflowError> {
        #[derive(Serialize)]
        struct Body<'a> {
            run_id: &'a str,
            datasets: &'a [DatasetInput],
        }

        self.client
            .send(ctx, ApiRequest::post("runs/log-inputs").json(&Body { run_id, datasets }))
            .await
    }

    /// Record an MLmodel description (JSON) for a run.
    pub async fn log_model(&self, ctx: &RequestContext, run_id: &str, model_json: &str) -> Result<(), MlflowError> {
        #[derive(Serialize)]
        struct Body<'a> {
            run_id: &'a str,
            model_json: &'a str,
        }

        self.client
            .send(ctx, ApiRequest::post("runs/log-model").json(&Body { run_id, model_json }))
            .await
    }
}
