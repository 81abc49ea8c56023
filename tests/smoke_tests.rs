//! End-to-end run against the bundled model files.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use lendr::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

fn model_path(file: &str) -> String {
    format!("{}/models/{file}", env!("CARGO_MANIFEST_DIR"))
}

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.classifiers.model_a.path = model_path("random_forest.json");
    config.classifiers.model_b.path = model_path("gradient_boosting.json");
    config.classifiers.model_c.path = model_path("xgboost.json");

    let state = lendr::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    lendr::api::router(state).await
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn submit(app: &Router, body: &Value) -> (StatusCode, Value) {
    call(
        app,
        Request::builder()
            .method("POST")
            .uri("/api/decisions")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn smoke_register_score_and_report() {
    let app = spawn_app().await;

    let (status, registered) = call(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header("Content-Type", "application/json")
            .body(Body::from(
                json!({ "name": "ana", "password": "s3cret" }).to_string(),
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = registered["data"]["user_id"].as_i64().unwrap();

    let (status, strong) = submit(
        &app,
        &json!({
            "income": 50000,
            "credit_score": 720,
            "loan_amount": 120000,
            "years_employed": 5,
            "user_id": user_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(strong["data"]["verdict_a"], true);
    assert_eq!(strong["data"]["verdict_b"], true);
    assert_eq!(strong["data"]["verdict_c"], true);

    let (status, weak) = submit(
        &app,
        &json!({
            "income": 20000,
            "credit_score": 500,
            "loan_amount": 300000,
            "years_employed": 1,
            "usuario_id": user_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(weak["data"]["verdict_a"], false);
    assert_eq!(weak["data"]["verdict_b"], false);
    assert_eq!(weak["data"]["verdict_c"], false);

    let (status, latest) = call(
        &app,
        Request::builder()
            .uri(format!("/api/users/{user_id}/decisions/latest"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["data"]["id"], weak["data"]["id"]);

    let (_, success) = call(
        &app,
        Request::builder()
            .uri("/api/stats/model_success")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(success["data"]["model_a"]["name"], "random_forest");
    assert_eq!(success["data"]["model_c"]["name"], "xgboost");
    assert_eq!(success["data"]["model_b"]["approved"], 1);

    let (_, comparison) = call(
        &app,
        Request::builder()
            .uri("/api/stats/model_comparison")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(comparison["data"]["all_approved"], 1);
    assert_eq!(comparison["data"]["all_rejected"], 1);
}

#[tokio::test]
async fn smoke_missing_model_file_aborts_startup() {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.classifiers.model_a.path = model_path("random_forest.json");
    config.classifiers.model_b.path = model_path("does_not_exist.json");
    config.classifiers.model_c.path = model_path("xgboost.json");

    let err = lendr::api::create_app_state_from_config(config, None)
        .await
        .err()
        .expect("startup should fail");
    assert!(err.to_string().contains("gradient_boosting"));
}
