//! Client and builder.

use std::time::Duration;

use mlflow_core::defaults::TRACKING_URI_ENV;
use mlflow_core::{
    ApiRequest, BaseEndpoint, HttpConfig, HttpExecutor, JsonTarget, MlflowError, RequestContext,
    ResponseMeta, ResponseSink, build_http_client,
};
use serde::de::DeserializeOwned;

use crate::services::{
    ArtifactService, ExperimentService, LoggedModelService, MetricService, ModelVersionService,
    RegisteredModelService, RunService, UserService,
};

/// MLflow API client.
///
/// Cheap to clone; clones share one connection pool. Resource groups are reached
/// through accessors such as [`Client::runs`].
#[derive(Debug, Clone)]
pub struct Client {
    executor: HttpExecutor,
}

impl Client {
    /// Create a client for the tracking server at `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str) -> Result<Self, MlflowError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client from `MLFLOW_TRACKING_URI`.
    pub fn from_env() -> Result<Self, MlflowError> {
        Self::builder().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The resolved API root, e.g. `http://localhost:5000/api/2.0/mlflow/`.
    pub fn base_url(&self) -> &BaseEndpoint {
        self.executor.endpoint()
    }

    /// Run an arbitrary API call through the transport core.
    ///
    /// Useful for endpoints without a typed wrapper.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        request: ApiRequest<'_>,
        sink: ResponseSink<'_>,
    ) -> Result<ResponseMeta, MlflowError> {
        self.executor.execute(ctx, request, sink).await
    }

    pub fn artifacts(&self) -> ArtifactService<'_> {
        ArtifactService::new(self)
    }

    pub fn experiments(&self) -> ExperimentService<'_> {
        ExperimentService::new(self)
    }

    pub fn logged_models(&self) -> LoggedModelService<'_> {
        LoggedModelService::new(self)
    }

    pub fn metrics(&self) -> MetricService<'_> {
        MetricService::new(self)
    }

    pub fn model_versions(&self) -> ModelVersionService<'_> {
        ModelVersionService::new(self)
    }

    pub fn registered_models(&self) -> RegisteredModelService<'_> {
        RegisteredModelService::new(self)
    }

    pub fn runs(&self) -> RunService<'_> {
        RunService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Execute and decode the body into a fresh `T`.
    pub(crate) async fn fetch<T>(&self, ctx: &RequestContext, request: ApiRequest<'_>) -> Result<T, MlflowError>
    where
        T: DeserializeOwned + Default + Send,
    {
        let mut out = T::default();
        self.decode_into(ctx, request, &mut out).await?;
        Ok(out)
    }

    pub(crate) async fn decode_into(
        &self,
        ctx: &RequestContext,
        request: ApiRequest<'_>,
        target: &mut dyn JsonTarget,
    ) -> Result<(), MlflowError> {
        self.executor
            .execute(ctx, request, ResponseSink::Json(target))
            .await
            .map(|_| ())
    }

    /// Execute and ignore the body.
    pub(crate) async fn send(&self, ctx: &RequestContext, request: ApiRequest<'_>) -> Result<(), MlflowError> {
        self.executor
            .execute(ctx, request, ResponseSink::Discard)
            .await
            .map(|_| ())
    }
}

/// Builder for [`Client`].
///
/// Base URL resolution order: `base_url()`, then `MLFLOW_TRACKING_URI`.
/// A supplied `reqwest::Client` takes precedence over any `HttpConfig`.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
    http_config: Option<HttpConfig>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a preconfigured transport.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn http_config(mut self, http_config: HttpConfig) -> Self {
        self.http_config = Some(http_config);
        self
    }

    /// Shortcut for setting the transport-level request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config
            .get_or_insert_with(HttpConfig::default)
            .timeout = Some(timeout);
        self
    }

    /// Shortcut for sending `Authorization: Bearer <token>` with every request.
    pub fn bearer_token(mut self, token: impl AsRef<str>) -> Self {
        self.http_config
            .get_or_insert_with(HttpConfig::default)
            .headers
            .insert("Authorization".to_string(), format!("Bearer {}", token.as_ref()));
        self
    }

    pub fn build(self) -> Result<Client, MlflowError> {
        let raw = resolve_base_url(self.base_url, |name| std::env::var(name).ok())?;
        let endpoint = BaseEndpoint::parse(&raw)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => build_http_client(&self.http_config.unwrap_or_default())?,
        };

        tracing::debug!(
            host = endpoint.as_url().host_str().unwrap_or_default(),
            "mlflow client configured"
        );
        Ok(Client {
            executor: HttpExecutor::with_http_client(endpoint, http_client),
        })
    }
}

fn resolve_base_url(
    explicit: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String, MlflowError> {
    if let Some(url) = explicit {
        return Ok(url);
    }
    if let Some(url) = env(TRACKING_URI_ENV)
        && !url.trim().is_empty()
    {
        return Ok(url);
    }
    Err(MlflowError::InvalidConfiguration(format!(
        "no tracking server URL: call base_url() or set {TRACKING_URI_ENV}"
    )))
}
