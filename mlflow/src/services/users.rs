use mlflow_core::{ApiRequest, MlflowError, RequestContext};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use crate::client::Client;
use crate::types::User;

/// User management of the basic-auth app. Most calls require an admin account.
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a Client,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    #[serde(serialize_with = "expose_password")]
    password: &'a SecretString,
}

fn expose_password<S: Serializer>(password: &&SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

#[derive(Default, Deserialize)]
struct UserResponse {
    #[serde(default)]
    user: Option<User>,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<User>, MlflowError> {
        let body = Credentials { username, password };
        let res: UserResponse = self
            .client
            .fetch(ctx, ApiRequest::post("users/create").json(&body))
            .await?;
        Ok(res.user)
    }

    pub async fn get(&self, ctx: &RequestContext, username: &str) -> Result<Option<User>, MlflowError> {
        let request = ApiRequest::get("users/get").query_param("username", username);
        let res: UserResponse = self.client.fetch(ctx, request).await?;
        Ok(res.user)
    }

    pub async fn update_password(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &SecretString,
    ) -> Result<(), MlflowError> {
        let body = Credentials { username, password };
        self.client
            .send(ctx, ApiRequest::patch("users/update-password").json(&body))
            .await
    }

    /// Grant or revoke admin rights. `is_admin` is always sent, including `false`.
    pub async fn update_admin(&self, ctx: &RequestContext, username: &str, is_admin: bool) -> Result<(), MlflowError> {
        #[derive(Serialize)]
        struct Body<'a> {
            username: &'a str,
            is_admin: bool,
        }

        self.client
            .send(
                ctx,
                ApiRequest::patch("users/update-admin").json(&Body { username, is_admin }),
            )
            .await
    }

    pub async fn delete(&self, ctx: &RequestContext, username: &str) -> Result<(), MlflowError> {
        #[derive(Serialize)]
        struct Body<'a> {
            username: &'a str,
        }

        self.client
            .send(ctx, ApiRequest::delete("users/delete").json(&Body { username }))
            .await
    }
}
