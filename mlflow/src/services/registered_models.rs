use mlflow_core::{ApiRequest, MlflowError, RequestContext};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::types::{Permission, RegisteredModelPermission};

/// Registered-model permissions.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredModelService<'a> {
    client: &'a Client,
}

#[derive(Serialize)]
struct PermissionBody<'a> {
    name: &'a str,
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    permission: Option<Permission>,
}

#[derive(Default, Deserialize)]
struct PermissionResponse {
    #[serde(default)]
    registered_model_permission: Option<RegisteredModelPermission>,
}

impl<'a> RegisteredModelService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create_permission(
        &self,
        ctx: &RequestContext,
        name: &str,
        username: &str,
        permission: Permission,
    ) -> Result<Option<RegisteredModelPermission>, MlflowError> {
        let body = PermissionBody {
            name,
            username,
            permission: Some(permission),
        };
        let res: PermissionResponse = self
            .client
            .fetch(ctx, ApiRequest::post("registered-models/permissions/create").json(&body))
            .await?;
        Ok(res.registered_model_permission)
    }

    pub async fn get_permission(
        &self,
        ctx: &RequestContext,
        name: &str,
        username: &str,
    ) -> Result<Option<RegisteredModelPermission>, MlflowError> {
        let request = ApiRequest::get("registered-models/permissions/get")
            .query_param("name", name)
            .query_param("username", username);
        let res: PermissionResponse = self.client.fetch(ctx, request).await?;
        Ok(res.registered_model_permission)
    }

    pub async fn update_permission(
        &self,
        ctx: &RequestContext,
        name: &str,
        username: &str,
        permission: Permission,
    ) -> Result<(), MlflowError> {
        let body = PermissionBody {
            name,
            username,
            permission: Some(permission),
        };
        self.client
            .send(ctx, ApiRequest::patch("registered-models/permissions/update").json(&body))
            .await
    }

    pub async fn delete_permission(&self, ctx: &RequestContext, name: &str, username: &str) -> Result<(), MlflowError> {
        let body = PermissionBody {
            name,
            username,
            permission: None,
        };
        self.client
            .send(ctx, ApiRequest::delete("registered-models/permissions/delete").json(&body))
            .await
    }
}
