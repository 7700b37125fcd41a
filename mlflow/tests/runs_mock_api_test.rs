//! Mock API tests for run endpoints.

use mlflow::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::new(&server.uri()).unwrap()
}

async fn last_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    let last = requests.last().expect("at least one request");
    serde_json::from_slice(&last.body).unwrap()
}

fn run_json() -> Value {
    json!({
        "info": {
            "run_id": "r-1",
            "run_name": "bright-owl",
            "experiment_id": "7",
            "status": "RUNNING",
            "start_time": 1700000000000i64,
            "lifecycle_stage": "active"
        },
        "data": {
            "tags": [{"key": "team", "value": "ml"}]
        }
    })
}

#[tokio::test]
async fn create_run_sends_tags_and_explicit_start_time() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/create"))
        .and(body_json(json!({
            "experiment_id": "7",
            "run_name": "bright-owl",
            "start_time": 1700000000000i64,
            "tags": [{"key": "team", "value": "ml"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"run": run_json()})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let run = client
        .runs()
        .create(
            &RequestContext::background(),
            "7",
            "bright-owl",
            Some(1700000000000),
            [("team", "ml")],
        )
        .await
        .unwrap()
        .expect("run in response");

    let info = run.info.unwrap();
    assert_eq!(info.run_id, "r-1");
    assert_eq!(info.status, Some(RunStatus::Running));
    assert_eq!(run.data.unwrap().tags[0].value, "ml");
}

#[tokio::test]
async fn create_run_defaults_start_time_to_now() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"run": run_json()})))
        .mount(&server)
        .await;

    let before = now_millis();
    client_for(&server)
        .runs()
        .create(
            &RequestContext::background(),
            "7",
            "",
            None,
            Vec::<(String, String)>::new(),
        )
        .await
        .unwrap();
    let after = now_millis();

    let body = last_body(&server).await;
    let start = body["start_time"].as_i64().unwrap();
    assert!(start >= before && start <= after);
    // empty name and tags are omitted
    assert!(body.get("run_name").is_none());
    assert!(body.get("tags").is_none());
}

#[tokio::test]
async fn update_stamps_end_time_for_terminal_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "run_info": {"run_id": "r-1", "experiment_id": "7", "status": "FINISHED"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let info = client
        .runs()
        .update(&RequestContext::background(), "r-1", "", RunStatus::Finished, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(info.status, Some(RunStatus::Finished));

    let body = last_body(&server).await;
    assert_eq!(body["status"], "FINISHED");
    assert!(body["end_time"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn update_keeps_running_runs_open() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/update"))
        .and(body_json(json!({"run_id": "r-1", "run_name": "renamed", "status": "RUNNING"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let info = client_for(&server)
        .runs()
        .update(&RequestContext::background(), "r-1", "renamed", RunStatus::Running, None)
        .await
        .unwrap();
    assert!(info.is_none());
}

#[tokio::test]
async fn update_uses_explicit_end_time() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/update"))
        .and(body_partial_json(json!({"status": "KILLED", "end_time": 42})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .runs()
        .update(&RequestContext::background(), "r-1", "", RunStatus::Killed, Some(42))
        .await
        .unwrap();
}

#[tokio::test]
async fn get_run_uses_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/2.0/mlflow/runs/get"))
        .and(query_param("run_id", "r-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"run": run_json()})))
        .expect(1)
        .mount(&server)
        .await;

    let run = client_for(&server)
        .runs()
        .get(&RequestContext::background(), "r-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(run.info.unwrap().experiment_id, "7");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn delete_and_restore() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/delete"))
        .and(body_json(json!({"run_id": "r-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/restore"))
        .and(body_json(json!({"run_id": "r-1"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = RequestContext::background();
    client.runs().delete(&ctx, "r-1").await.unwrap();
    client.runs().restore(&ctx, "r-1").await.unwrap();
}

#[tokio::test]
async fn search_runs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/search"))
        .and(body_json(json!({
            "experiment_ids": ["7"],
            "filter": "metrics.rmse < 1",
            "run_view_type": "ALL",
            "max_results": 10,
            "order_by": ["start_time DESC"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "runs": [run_json()],
            "next_page_token": "next"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRunsRequest::new(["7"])
        .with_filter("metrics.rmse < 1")
        .with_view_type(ViewType::All)
        .with_max_results(10)
        .order_by("start_time DESC");
    let res = client_for(&server)
        .runs()
        .search(&RequestContext::background(), &request)
        .await
        .unwrap();
    assert_eq!(res.runs.len(), 1);
    assert_eq!(res.next_page_token.as_deref(), Some("next"));
}

#[tokio::test]
async fn tags_and_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/set-tag"))
        .and(body_json(json!({"run_id": "r-1", "key": "stage", "value": "dev"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/delete-tag"))
        .and(body_json(json!({"run_id": "r-1", "key": "stage"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/log-parameter"))
        .and(body_json(json!({"run_id": "r-1", "key": "alpha", "value": "0.5"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = RequestContext::background();
    client.runs().set_tag(&ctx, "r-1", "stage", "dev").await.unwrap();
    client.runs().delete_tag(&ctx, "r-1", "stage").await.unwrap();
    client.runs().log_param(&ctx, "r-1", "alpha", "0.5").await.unwrap();
}

#[tokio::test]
async fn log_metric_always_sends_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/log-metric"))
        .and(body_json(json!({
            "run_id": "r-1",
            "key": "loss",
            "value": 0.0,
            "timestamp": 1000,
            "step": 0
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .runs()
        .log_metric(&RequestContext::background(), "r-1", "loss", 0.0, Some(1000), 0)
        .await
        .unwrap();
}

#[tokio::test]
async fn log_metric_defaults_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/log-metric"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client_for(&server)
        .runs()
        .log_metric(&RequestContext::background(), "r-1", "acc", 0.9, None, 3)
        .await
        .unwrap();

    let body = last_body(&server).await;
    assert!(body["timestamp"].as_i64().unwrap() > 1_577_836_800_000);
    assert_eq!(body["step"], 3);
}

#[tokio::test]
async fn log_batch_flattens_run_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/log-batch"))
        .and(body_json(json!({
            "run_id": "r-1",
            "metrics": [{"key": "rmse", "value": 0.3, "timestamp": 5, "step": 1}],
            "params": [{"key": "depth", "value": "4"}]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let data = RunData {
        metrics: vec![Metric::new("rmse", 0.3, 5, 1)],
        params: vec![Param::from(("depth", "4"))],
        tags: vec![],
    };
    client_for(&server)
        .runs()
        .log_batch(&RequestContext::background(), "r-1", &data)
        .await
        .unwrap();
}

#[tokio::test]
async fn log_inputs_and_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/log-inputs"))
        .and(body_json(json!({
            "run_id": "r-1",
            "datasets": [{
                "tags": [{"key": "mlflow.data.context", "value": "train"}],
                "dataset": {"name": "iris", "digest": "d1", "source_type": "local", "source": "{}"}
            }]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/2.0/mlflow/runs/log-model"))
        .and(body_json(json!({"run_id": "r-1", "model_json": "{\"artifact_path\":\"model\"}"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let datasets = vec![DatasetInput {
        tags: vec![InputTag {
            key: "mlflow.data.context".into(),
            value: "train".into(),
        }],
        dataset: Some(Dataset {
            name: "iris".into(),
            digest: "d1".into(),
            source_type: "local".into(),
            source: "{}".into(),
            ..Default::default()
        }),
    }];

    let client = client_for(&server);
    let ctx = RequestContext::background();
    client.runs().log_inputs(&ctx, "r-1", &datasets).await.unwrap();
    client
        .runs()
        .log_model(&ctx, "r-1", r#"{"artifact_path":"model"}"#)
        .await
        .unwrap();
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

#[tokio::test]
async fn non_finite_metrics_are_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = RequestContext::background();
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = client
            .runs()
            .log_metric(&ctx, "r-1", "loss", value, Some(1), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, MlflowError::InvalidRequest(_)));
    }

    let data = RunData {
        metrics: vec![Metric::new("acc", 0.9, 1, 0), Metric::new("loss", f64::NAN, 1, 0)],
        ..Default::default()
    };
    let err = client.runs().log_batch(&ctx, "r-1", &data).await.unwrap_err();
    assert!(matches!(err, MlflowError::InvalidRequest(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}
