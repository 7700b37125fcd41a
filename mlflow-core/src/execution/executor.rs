//! Transport executor.
//!
//! One `execute` call performs exactly one HTTP round trip:
//! resolve → build → send → classify → decode (error or result).
//! No retries are attempted.

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tracing::Instrument;
use uuid::Uuid;

use super::classify::{ResponseClass, classify_status};
use super::endpoint::BaseEndpoint;
use super::errors::decode_error_response;
use super::request::ApiRequest;
use super::sink::{ResponseSink, write_response};
use crate::defaults::http::JSON_CONTENT_TYPE;
use crate::error::MlflowError;
use crate::types::{HttpConfig, build_http_client};
use crate::utils::cancel::RequestContext;

/// Status and headers of a successful response.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: u16,
    pub headers: HeaderMap,
}

/// Executes API requests against a single tracking server.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    endpoint: BaseEndpoint,
    http_client: reqwest::Client,
}

impl HttpExecutor {
    /// Create an executor with a transport built from `HttpConfig::default()`.
    pub fn new(endpoint: BaseEndpoint) -> Result<Self, MlflowError> {
        let http_client = build_http_client(&HttpConfig::default())?;
        Ok(Self::with_http_client(endpoint, http_client))
    }

    pub fn with_http_client(endpoint: BaseEndpoint, http_client: reqwest::Client) -> Self {
        Self {
            endpoint,
            http_client,
        }
    }

    pub fn endpoint(&self) -> &BaseEndpoint {
        &self.endpoint
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Perform one API call.
    ///
    /// On success the body has been delivered into `sink`. Failures are reported as
    /// `InvalidRequest`/`Encoding` (nothing was sent), `Transport` (no response,
    /// cancelled or timed out), `Api` (status 4xx/5xx) or `Decode`.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        request: ApiRequest<'_>,
        sink: ResponseSink<'_>,
    ) -> Result<ResponseMeta, MlflowError> {
        let (method, path, query, body) = request.into_parts();
        let body = body?;

        let mut url = self.endpoint.resolve(&path)?;
        url.set_query(query.compose().as_deref());

        let span = tracing::debug_span!(
            "mlflow_request",
            request_id = %Uuid::new_v4(),
            method = %method,
            path = %path,
        );

        let mut builder = self.http_client.request(method.into(), url);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let deadline = ctx.deadline();
        let call = async move {
            tokio::select! {
                biased;
                _ = ctx.cancelled() => {
                    tracing::debug!("request cancelled");
                    Err(MlflowError::cancelled())
                }
                _ = deadline_elapsed(deadline) => {
                    tracing::debug!("request deadline exceeded");
                    Err(MlflowError::timeout())
                }
                res = round_trip(builder, sink) => res,
            }
        };
        call.instrument(span).await
    }
}

async fn round_trip(
    builder: reqwest::RequestBuilder,
    sink: ResponseSink<'_>,
) -> Result<ResponseMeta, MlflowError> {
    tracing::debug!("sending request");
    let resp = builder.send().await?;

    let meta = ResponseMeta {
        status: resp.status().as_u16(),
        headers: resp.headers().clone(),
    };

    match classify_status(meta.status) {
        ResponseClass::ApiError => {
            let err = decode_error_response(resp).await;
            tracing::debug!(
                status = meta.status,
                error_code = %err.error_code,
                "request failed"
            );
            Err(MlflowError::Api(err))
        }
        ResponseClass::Success => {
            write_response(resp, sink).await?;
            tracing::debug!(status = meta.status, "request completed");
            Ok(meta)
        }
    }
}

async fn deadline_elapsed(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
