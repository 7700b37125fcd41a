use mlflow_core::{ApiRequest, MlflowError, QueryParams, RequestContext};

use crate::client::Client;
use crate::types::{GetMetricHistoryRequest, MetricHistory};

#[derive(Debug, Clone, Copy)]
pub struct MetricService<'a> {
    client: &'a Client,
}

impl<'a> MetricService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// All recorded values of one metric, oldest first. Paginate with `page_token`.
    pub async fn get_history(
        &self,
        ctx: &RequestContext,
        request: &GetMetricHistoryRequest,
    ) -> Result<MetricHistory, MlflowError> {
        let mut query = QueryParams::new();
        query
            .set("run_id", request.run_id.as_str())
            .set("metric_key", request.metric_key.as_str())
            .set_opt("max_results", request.max_results.map(|n| n.to_string()))
            .set_opt("page_token", request.page_token.as_deref());

        self.client
            .fetch(ctx, ApiRequest::get("metrics/get-history").query(query))
            .await
    }
}
