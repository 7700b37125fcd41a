use mlflow_core::{ApiRequest, MlflowError, RequestContext, ResponseSink};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWrite;

use crate::client::Client;
use crate::types::{
    CreateLoggedModelRequest, LoggedModel, LoggedModelArtifacts, LoggedModelParameter,
    LoggedModelStatus, LoggedModelTag, SearchLoggedModelsRequest, SearchLoggedModelsResponse,
};
use crate::utils::path_segment;

/// Logged models: creation, lookup, search, tags, params and artifacts.
#[derive(Debug, Clone, Copy)]
pub struct LoggedModelService<'a> {
    client: &'a Client,
}

#[derive(Default, Deserialize)]
struct ModelResponse {
    #[serde(default)]
    model: Option<LoggedModel>,
}

#[derive(Default, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<LoggedModel>,
}

fn model_path(model_id: &str) -> Result<String, MlflowError> {
    Ok(format!("logged-models/{}", path_segment(model_id)?))
}

impl<'a> LoggedModelService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: &CreateLoggedModelRequest,
    ) -> Result<Option<LoggedModel>, MlflowError> {
        let res: ModelResponse = self
            .client
            .fetch(ctx, ApiRequest::post("logged-models").json(request))
            .await?;
        Ok(res.model)
    }

    pub async fn get(&self, ctx: &RequestContext, model_id: &str) -> Result<Option<LoggedModel>, MlflowError> {
        let res: ModelResponse = self
            .client
            .fetch(ctx, ApiRequest::get(model_path(model_id)?))
            .await?;
        Ok(res.model)
    }

    /// Fetch several models in one call. Ids are sent as repeated `model_ids` parameters.
    pub async fn get_batch<I, S>(&self, ctx: &RequestContext, model_ids: I) -> Result<Vec<LoggedModel>, MlflowError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let query = model_ids.into_iter().map(|id| ("model_ids", id)).collect();
        let res: ModelsResponse = self
            .client
            .fetch(ctx, ApiRequest::get("logged-models:batchGet").query(query))
            .await?;
        Ok(res.models)
    }

    pub async fn delete(&self, ctx: &RequestContext, model_id: &str) -> Result<(), MlflowError> {
        #[derive(Serialize)]
        struct Body<'a> {
            model_id: &'a str,
        }

        self.client
            .send(ctx, ApiRequest::delete(model_path(model_id)?).json(&Body { model_id }))
            .await
    }

    pub async fn search(
        &self,
        ctx: &RequestContext,
        request: &SearchLoggedModelsRequest,
    ) -> Result<SearchLoggedModelsResponse, MlflowError> {
        self.client
            .fetch(ctx, ApiRequest::post("logged-models/search").json(request))
            .await
    }

    /// Set (or overwrite) tags and return the updated model.
    pub async fn set_tags<I, K, V>(
        &self,
        ctx: &RequestContext,
        model_id: &str,
        tags: I,
    ) -> Result<Option<LoggedModel>, MlflowError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        #[derive(Serialize)]
        struct Body {
            tags: Vec<LoggedModelTag>,
        }

        let body = Body {
            tags: tags.into_iter().map(LoggedModelTag::from).collect(),
        };
        let path = format!("{}/tags", model_path(model_id)?);
        let res: ModelResponse = self
            .client
            .fetch(ctx, ApiRequest::patch(path).json(&body))
            .await?;
        Ok(res.model)
    }

    pub async fn delete_tag(&self, ctx: &RequestContext, model_id: &str, key: &str) -> Result<(), MlflowError> {
        let path = format!("{}/tags/{}", model_path(model_id)?, path_segment(key)?);
        self.client.send(ctx, ApiRequest::delete(path)).await
    }

    pub async fn log_params<I, K, V>(&self, ctx: &RequestContext, model_id: &str, params: I) -> Result<(), MlflowError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        #[derive(Serialize)]
        struct Body<'a> {
            model_id: &'a str,
            params: Vec<LoggedModelParameter>,
        }

        let body = Body {
            model_id,
            params: params.into_iter().map(LoggedModelParameter::from).collect(),
        };
        let path = format!("{}/params", model_path(model_id)?);
        self.client.send(ctx, ApiRequest::post(path).json(&body)).await
    }

    /// List artifacts of a model; `path` selects a sub-directory.
    pub async fn list_artifacts(
        &self,
        ctx: &RequestContext,
        model_id: &str,
        path: Option<&str>,
    ) -> Result<LoggedModelArtifacts, MlflowError> {
        let mut request = ApiRequest::get(format!("{}/artifacts/directories", model_path(model_id)?));
        if let Some(dir) = path.filter(|p| !p.is_empty()) {
            request = request.query_param("artifact_directory_path", dir);
        }
        self.client.fetch(ctx, request).await
    }

    /// Stream one artifact file into `writer`.
    pub async fn download_artifact<W>(
        &self,
        ctx: &RequestContext,
        model_id: &str,
        path: &str,
        writer: &mut W,
    ) -> Result<(), MlflowError>
    where
        W: AsyncWrite + Send + Unpin,
    {
        let request = ApiRequest::get(format!("{}/artifacts/files", model_path(model_id)?))
            .query_param("artifact_file_path", path);
        self.client
            .execute(ctx, request, ResponseSink::bytes(writer))
            .await
            .map(|_| ())
    }

    /// Move a model to its final status (usually `Ready` or a failure state).
    pub async fn finalize(
        &self,
        ctx: &RequestContext,
        model_id: &str,
        status: LoggedModelStatus,
    ) -> Result<Option<LoggedModel>, MlflowError> {
        #[derive(Serialize)]
        struct Body<'a> {
            model_id: &'a str,
            status: LoggedModelStatus,
        }

        let res: ModelResponse = self
            .client
            .fetch(
                ctx,
                ApiRequest::post("logged-models/finalize").json(&Body { model_id, status }),
            )
            .await?;
        Ok(res.model)
    }
}
