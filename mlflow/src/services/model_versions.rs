use mlflow_core::{ApiRequest, MlflowError, RequestContext};
use serde::Serialize;

use crate::client::Client;

/// Versions of registered models.
#[derive(Debug, Clone, Copy)]
pub struct ModelVersionService<'a> {
    client: &'a Client,
}

impl<'a> ModelVersionService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Set a tag on a model version, overwriting any existing value.
    pub async fn set_tag(
        &self,
        ctx: &RequestContext,
        name: &str,
        version: &str,
        key: &str,
        value: &str,
    ) -> Result<(), MlflowError> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
            version: &'a str,
            key: &'a str,
            value: &'a str,
        }

        let body = Body {
            name,
            version,
            key,
            value,
        };
        self.client
            .send(ctx, ApiRequest::post("model-versions/set-tag").json(&body))
            .await
    }
}
