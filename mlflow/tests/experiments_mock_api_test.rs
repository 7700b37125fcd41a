//! Mock API tests for experiments, registered models and their permissions.

use mlflow::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::new(&server.uri()).unwrap()
}

#[tokio::test]
async fn create_update_delete_experiment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/experiments/create"))
        .and(body_json(json!({"name": "fraud"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"experiment_id": "12"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/experiments/update"))
        .and(body_json(json!({"experiment_id": "12", "new_name": "fraud-v2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/experiments/delete"))
        .and(body_json(json!({"experiment_id": "12"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = RequestContext::background();
    let id = client.experiments().create(&ctx, "fraud").await.unwrap();
    assert_eq!(id, "12");
    client.experiments().update(&ctx, &id, "fraud-v2").await.unwrap();
    client.experiments().delete(&ctx, &id).await.unwrap();
}

#[tokio::test]
async fn duplicate_experiment_is_reported_with_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/experiments/create"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_code": "RESOURCE_ALREADY_EXISTS",
            "message": "Experiment 'fraud' already exists."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .experiments()
        .create(&RequestContext::background(), "fraud")
        .await
        .unwrap_err();

    let api = err.api_error().unwrap();
    assert_eq!(api.status_code, 400);
    assert!(api.is_resource_already_exists());
    assert_eq!(api.error_code, mlflow::RESOURCE_ALREADY_EXISTS);
}

#[tokio::test]
async fn experiment_permission_lifecycle() {
    let server = MockServer::start().await;
    let permission = json!({"experiment_permission": {
        "experiment_id": "12", "user_id": 4, "permission": "EDIT"
    }});

    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/experiments/permissions/create"))
        .and(body_json(json!({"experiment_id": "12", "username": "bo", "permission": "EDIT"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(permission.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/mlflow/experiments/permissions/get"))
        .and(query_param("experiment_id", "12"))
        .and(query_param("username", "bo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(permission))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/2.0/mlflow/experiments/permissions/update"))
        .and(body_json(json!({"experiment_id": "12", "username": "bo", "permission": "MANAGE"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/2.0/mlflow/experiments/permissions/delete"))
        .and(body_json(json!({"experiment_id": "12", "username": "bo"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = RequestContext::background();
    let experiments = client.experiments();

    let created = experiments
        .create_permission(&ctx, "12", "bo", Permission::Edit)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.user_id, 4);
    assert_eq!(created.permission, Permission::Edit);

    let fetched = experiments.get_permission(&ctx, "12", "bo").await.unwrap();
    assert_eq!(fetched, Some(created));

    experiments
        .update_permission(&ctx, "12", "bo", Permission::Manage)
        .await
        .unwrap();
    experiments.delete_permission(&ctx, "12", "bo").await.unwrap();
}

#[tokio::test]
async fn missing_permission_envelope_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/mlflow/experiments/permissions/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let res = client_for(&server)
        .experiments()
        .get_permission(&RequestContext::background(), "12", "bo")
        .await
        .unwrap();
    assert!(res.is_none());
}

#[tokio::test]
async fn registered_model_permission_lifecycle() {
    let server = MockServer::start().await;
    let permission = json!({"registered_model_permission": {
        "name": "churn", "user_id": 9, "permission": "READ"
    }});

    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/registered-models/permissions/create"))
        .and(body_json(json!({"name": "churn", "username": "cy", "permission": "READ"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(permission.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/mlflow/registered-models/permissions/get"))
        .and(query_param("name", "churn"))
        .and(query_param("username", "cy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(permission))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/2.0/mlflow/registered-models/permissions/update"))
        .and(body_json(json!({"name": "churn", "username": "cy", "permission": "NO_PERMISSIONS"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/2.0/mlflow/registered-models/permissions/delete"))
        .and(body_json(json!({"name": "churn", "username": "cy"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = RequestContext::background();
    let models = client.registered_models();

    let created = models
        .create_permission(&ctx, "churn", "cy", Permission::Read)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.name, "churn");
    assert_eq!(created.user_id, 9);

    let fetched = models.get_permission(&ctx, "churn", "cy").await.unwrap().unwrap();
    assert_eq!(fetched.permission, Permission::Read);

    models
        .update_permission(&ctx, "churn", "cy", Permission::NoPermissions)
        .await
        .unwrap();
    models.delete_permission(&ctx, "churn", "cy").await.unwrap();
}

#[tokio::test]
async fn model_version_set_tag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/model-versions/set-tag"))
        .and(body_json(json!({
            "name": "churn", "version": "3", "key": "validated", "value": "true"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .model_versions()
        .set_tag(&RequestContext::background(), "churn", "3", "validated", "true")
        .await
        .unwrap();
}
