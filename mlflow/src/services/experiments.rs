use mlflow_core::{ApiRequest, MlflowError, RequestContext};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::types::{ExperimentPermission, Permission};

/// Experiments and their per-user permissions.
#[derive(Debug, Clone, Copy)]
pub struct ExperimentService<'a> {
    client: &'a Client,
}

#[derive(Serialize)]
struct ExperimentRef<'a> {
    experiment_id: &'a str,
}

#[derive(Serialize)]
struct PermissionBody<'a> {
    experiment_id: &'a str,
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    permission: Option<Permission>,
}

#[derive(Default, Deserialize)]
struct CreateResponse {
    #[serde(default)]
    experiment_id: String,
}

#[derive(Default, Deserialize)]
struct PermissionResponse {
    #[serde(default)]
    experiment_permission: Option<ExperimentPermission>,
}

impl<'a> ExperimentService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create an experiment and return its id.
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> Result<String, MlflowError> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
        }

        let res: CreateResponse = self
            .client
            .fetch(ctx, ApiRequest::post("experiments/create").json(&Body { name }))
            .await?;
        Ok(res.experiment_id)
    }

    /// Rename an experiment.
    pub async fn update(&self, ctx: &RequestContext, experiment_id: &str, new_name: &str) -> Result<(), MlflowError> {
        #[derive(Serialize)]
        struct Body<'a> {
            experiment_id: &'a str,
            new_name: &'a str,
        }

        self.client
            .send(
                ctx,
                ApiRequest::post("experiments/update").json(&Body {
                    experiment_id,
                    new_name,
                }),
            )
            .await
    }

    /// Mark an experiment (and its runs) as deleted.
    pub async fn delete(&self, ctx: &RequestContext, experiment_id: &str) -> Result<(), MlflowError> {
        self.client
            .send(
                ctx,
                ApiRequest::post("experiments/delete").json(&ExperimentRef { experiment_id }),
            )
            .await
    }

    /// Grant `username` access to an experiment. Requires MANAGE.
    pub async fn create_permission(
        &self,
        ctx: &RequestContext,
        experiment_id: &str,
        username: &str,
        permission: Permission,
    ) -> Result<Option<ExperimentPermission>, MlflowError> {
        let body = PermissionBody {
            experiment_id,
            username,
            permission: Some(permission),
        };
        let res: PermissionResponse = self
            .client
            .fetch(ctx, ApiRequest::post("experiments/permissions/create").json(&body))
            .await?;
        Ok(res.experiment_permission)
    }

    pub async fn get_permission(
        &self,
        ctx: &RequestContext,
        experiment_id: &str,
        username: &str,
    ) -> Result<Option<ExperimentPermission>, MlflowError> {
        let request = ApiRequest::get("experiments/permissions/get")
            .query_param("experiment_id", experiment_id)
            .query_param("username", username);
        let res: PermissionResponse = self.client.fetch(ctx, request).await?;
        Ok(res.experiment_permission)
    }

    pub async fn update_permission(
        &self,
        ctx: &RequestContext,
        experiment_id: &str,
        username: &str,
        permission: Permission,
    ) -> Result<(), MlflowError> {
        let body = PermissionBody {
            experiment_id,
            username,
            permission: Some(permission),
        };
        self.client
            .send(ctx, ApiRequest::patch("experiments/permissions/update").json(&body))
            .await
    }

    pub async fn delete_permission(
        &self,
        ctx: &RequestContext,
        experiment_id: &str,
        username: &str,
    ) -> Result<(), MlflowError> {
        let body = PermissionBody {
            experiment_id,
            username,
            permission: None,
        };
        self.client
            .send(ctx, ApiRequest::delete("experiments/permissions/delete").json(&body))
            .await
    }
}
