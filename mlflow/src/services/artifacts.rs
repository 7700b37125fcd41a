use mlflow_core::{ApiRequest, MlflowError, QueryParams, RequestContext};

use crate::client::Client;
use crate::types::{ListArtifactsRequest, ListArtifactsResponse};

/// Run artifact listing.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactService<'a> {
    client: &'a Client,
}

impl<'a> ArtifactService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List the artifacts of a run, optionally under a sub-directory.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        request: &ListArtifactsRequest,
    ) -> Result<ListArtifactsResponse, MlflowError> {
        let mut query = QueryParams::new();
        query
            .set("run_id", request.run_id.as_str())
            .set_opt("path", request.path.as_deref())
            .set_opt("page_token", request.page_token.as_deref());

        self.client
            .fetch(ctx, ApiRequest::get("artifacts/list").query(query))
            .await
    }
}
