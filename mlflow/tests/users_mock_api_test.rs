//! Mock API tests for user management.

use mlflow::prelude::*;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::new(&server.uri()).unwrap()
}

#[tokio::test]
async fn create_and_get_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/users/create"))
        .and(body_json(json!({"username": "ana", "password": "s3cret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 5, "username": "ana", "is_admin": false}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/mlflow/users/get"))
        .and(query_param("username", "ana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 5, "username": "ana", "is_admin": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = RequestContext::background();
    let password = SecretString::from("s3cret".to_string());

    let created = client.users().create(&ctx, "ana", &password).await.unwrap().unwrap();
    assert_eq!(created.id, 5);
    assert!(!created.is_admin);

    let fetched = client.users().get(&ctx, "ana").await.unwrap().unwrap();
    assert!(fetched.is_admin);
}

#[tokio::test]
async fn password_and_admin_updates_use_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/2.0/mlflow/users/update-password"))
        .and(body_json(json!({"username": "ana", "password": "n3w"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/2.0/mlflow/users/update-admin"))
        .and(body_json(json!({"username": "ana", "is_admin": false})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = RequestContext::background();
    client
        .users()
        .update_password(&ctx, "ana", &SecretString::from("n3w".to_string()))
        .await
        .unwrap();
    // false must still be sent
    client.users().update_admin(&ctx, "ana", false).await.unwrap();
}

#[tokio::test]
async fn delete_user_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/2.0/mlflow/users/delete"))
        .and(body_json(json!({"username": "ana"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .users()
        .delete(&RequestContext::background(), "ana")
        .await
        .unwrap();
}

#[tokio::test]
async fn forbidden_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/mlflow/users/get"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error_code": "PERMISSION_DENIED",
            "message": "Permission denied"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .users()
        .get(&RequestContext::background(), "ana")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(403));
    assert_eq!(err.api_error().unwrap().error_code, "PERMISSION_DENIED");
    assert!(!err.is_retryable());
}
