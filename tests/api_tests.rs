//! HTTP surface tests driving the router in-process.

#[path = "test_utils/mod.rs"]
mod test_utils;

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use inventory::config::AppConfig;
use inventory::contract::StaticContractService;
use inventory::server::{AppState, create_app};
use serde_json::{Value, json};
use test_utils::setup_test_db_arc;
use tower::ServiceExt;
use uuid::Uuid;

async fn test_app(default_contract: Option<Uuid>) -> anyhow::Result<Router> {
    let db = setup_test_db_arc().await?;
    let state = AppState::new(
        Arc::new(AppConfig::default()),
        db,
        Arc::new(StaticContractService(default_contract)),
    );
    Ok(create_app(state))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

async fn create_csp(app: &Router, contract_id: Uuid) -> anyhow::Result<String> {
    let (status, body) = send(
        app,
        Method::POST,
        "/csp-infos",
        Some(json!({
            "contract_id": contract_id,
            "name": "aws-main",
            "auth": "{\"access_key\":\"AKIA\"}",
            "type": "AWS"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body["id"].as_str().unwrap_or_default().to_string())
}

async fn create_cluster(app: &Router, contract_id: Uuid, csp_id: &str) -> anyhow::Result<String> {
    let (status, body) = send(
        app,
        Method::POST,
        "/clusters",
        Some(json!({
            "contract_id": contract_id,
            "csp_id": csp_id,
            "name": "tks-1",
            "conf": { "region": "ap-northeast-2", "num_of_az": 3 }
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body["id"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn root_returns_service_info() -> anyhow::Result<()> {
    let app = test_app(None).await?;

    let (status, body) = send(&app, Method::GET, "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "inventory");
    Ok(())
}

#[tokio::test]
async fn healthz_reports_ok() -> anyhow::Result<()> {
    let app = test_app(None).await?;

    let (status, body) = send(&app, Method::GET, "/healthz", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn malformed_id_is_validation_error_with_trace_id() -> anyhow::Result<()> {
    let app = test_app(None).await?;

    let request = Request::builder()
        .uri("/clusters/NO_UUID_STRING")
        .header("x-trace-id", "trace-abc")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/problem+json"
    );
    assert_eq!(response.headers().get("x-trace-id").unwrap(), "trace-abc");

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["message"], "invalid cluster ID NO_UUID_STRING");
    assert_eq!(body["trace_id"], "trace-abc");
    Ok(())
}

#[tokio::test]
async fn cors_and_trace_headers_are_both_applied() -> anyhow::Result<()> {
    let app = test_app(None).await?;

    let request = Request::builder()
        .uri("/healthz")
        .header("origin", "https://console.example.com")
        .header("x-trace-id", "trace-cors")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(response.headers().get("x-trace-id").unwrap(), "trace-cors");
    Ok(())
}

#[tokio::test]
async fn csp_auth_is_only_exposed_through_auth_endpoint() -> anyhow::Result<()> {
    let app = test_app(None).await?;
    let contract_id = Uuid::new_v4();
    let csp_id = create_csp(&app, contract_id).await?;

    let (status, body) = send(&app, Method::GET, &format!("/csp-infos/{}", csp_id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "AWS");
    assert!(body.get("auth").is_none());

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/csp-infos/{}/auth", csp_id),
        Some(json!({ "auth": "rotated" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/csp-infos/{}/auth", csp_id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["auth"], "rotated");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/contracts/{}/csp-ids", contract_id),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ids"], json!([csp_id]));
    Ok(())
}

#[tokio::test]
async fn cluster_listing_uses_default_contract_without_filters() -> anyhow::Result<()> {
    let contract_id = Uuid::new_v4();
    let app = test_app(Some(contract_id)).await?;
    let csp_id = create_csp(&app, contract_id).await?;
    let cluster_id = create_cluster(&app, contract_id, &csp_id).await?;

    let (status, body) = send(&app, Method::GET, "/clusters", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["id"], cluster_id);
    assert_eq!(body[0]["status"], "UNSPECIFIED");
    assert_eq!(body[0]["conf"]["region"], "ap-northeast-2");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/clusters?csp_id={}", csp_id),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn cluster_listing_rejects_both_filters() -> anyhow::Result<()> {
    let app = test_app(None).await?;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!(
            "/clusters?contract_id={}&csp_id={}",
            Uuid::new_v4(),
            Uuid::new_v4()
        ),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    Ok(())
}

#[tokio::test]
async fn cluster_listing_without_contract_source_is_unavailable() -> anyhow::Result<()> {
    let app = test_app(None).await?;

    let (status, body) = send(&app, Method::GET, "/clusters", None).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    Ok(())
}

#[tokio::test]
async fn cluster_creation_with_unknown_csp_is_not_found() -> anyhow::Result<()> {
    let app = test_app(None).await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/clusters",
        Some(json!({
            "contract_id": Uuid::new_v4(),
            "csp_id": Uuid::new_v4(),
            "name": "orphan"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn cluster_status_and_kubeconfig_callbacks() -> anyhow::Result<()> {
    let contract_id = Uuid::new_v4();
    let app = test_app(None).await?;
    let csp_id = create_csp(&app, contract_id).await?;
    let cluster_id = create_cluster(&app, contract_id, &csp_id).await?;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/clusters/{}/status", cluster_id),
        Some(json!({ "status": "RUNNING", "status_desc": "ready", "workflow_id": "wf-1" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/clusters/{}/kubeconfig", cluster_id),
        Some(json!({ "kubeconfig": "apiVersion: v1" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, &format!("/clusters/{}", cluster_id), None).await?;
    assert_eq!(body["status"], "RUNNING");
    assert_eq!(body["workflow_id"], "wf-1");
    assert_eq!(body["kubeconfig"], "apiVersion: v1");
    Ok(())
}

#[tokio::test]
async fn app_group_label_conflict_and_application_upsert() -> anyhow::Result<()> {
    let app = test_app(None).await?;
    let cluster_id = Uuid::new_v4();
    let group = json!({ "name": "lma", "type": "LMA", "external_label": "X" });

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/clusters/{}/app-groups", cluster_id),
        Some(group.clone()),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let group_id = body["id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/clusters/{}/app-groups", cluster_id),
        Some(group),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/app-groups/{}/applications/GRAFANA", group_id),
        Some(json!({ "endpoint": "https://grafana", "metadata": "{}" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/app-groups/{}/applications?type=GRAFANA", group_id),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["type"], "GRAFANA");
    assert_eq!(body[0]["endpoint"], "https://grafana");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/app-groups/{}/applications/NOT_A_TYPE", group_id),
        Some(json!({ "endpoint": "x" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/app-groups?type=LMA", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], group_id);

    let (status, _) = send(&app, Method::GET, "/app-groups", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, &format!("/app-groups/{}", group_id), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/app-groups/{}/applications", group_id),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn cluster_app_groups_page_defaults_to_configured_size() -> anyhow::Result<()> {
    let app = test_app(None).await?;
    let cluster_id = Uuid::new_v4();

    for i in 0..12 {
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/clusters/{}/app-groups", cluster_id),
            Some(json!({ "name": format!("group-{}", i), "type": "LMA" })),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/clusters/{}/app-groups", cluster_id),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(10));

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/clusters/{}/app-groups?offset=10&limit=5", cluster_id),
        None,
    )
    .await?;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn cluster_app_groups_rejects_out_of_range_paging() -> anyhow::Result<()> {
    let app = test_app(None).await?;
    let cluster_id = Uuid::new_v4();

    for query in ["limit=18446744073709551615", "offset=9223372036854775808"] {
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/clusters/{}/app-groups?{}", cluster_id, query),
            None,
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }
    Ok(())
}

#[tokio::test]
async fn app_serve_app_lifecycle() -> anyhow::Result<()> {
    let app = test_app(None).await?;
    let contract_id = Uuid::new_v4();

    let (status, body) = send(
        &app,
        Method::POST,
        "/app-serve-apps",
        Some(json!({
            "contract_id": contract_id,
            "name": "app1",
            "type": "build",
            "app_type": "springboot",
            "target_cluster_id": Uuid::new_v4(),
            "task": { "version": "v1", "status": "PREPARING", "port": "8080" }
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let app_id = body["app_serve_app_id"].as_str().unwrap_or_default().to_string();
    let task_id = body["task_id"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/app-serve-app-tasks/{}/status", task_id),
        Some(json!({ "status": "DEPLOY_SUCCESS", "output": "ok" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/app-serve-apps/{}/endpoint", app_id),
        Some(json!({
            "task_id": task_id,
            "endpoint_url": "https://app1",
            "helm_revision": 2
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/app-serve-apps/{}", app_id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["app"]["status"], "DEPLOY_SUCCESS");
    assert_eq!(body["app"]["endpoint_url"], "https://app1");
    assert_eq!(body["tasks"][0]["helm_revision"], 2);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/app-serve-apps/{}/tasks", app_id),
        Some(json!({ "version": "v2", "status": "PREPARING" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_string());

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/app-serve-apps?contract_id={}", contract_id),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], app_id);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/app-serve-apps/{}/tasks", Uuid::new_v4()),
        Some(json!({ "version": "v1" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn keycloak_infos_round_trip_through_cluster_routes() -> anyhow::Result<()> {
    let app = test_app(None).await?;
    let cluster_id = Uuid::new_v4();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/clusters/{}/keycloak-infos", cluster_id),
        Some(json!({ "realm": "master", "client_id": "k8s" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/clusters/{}/keycloak-infos", cluster_id),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["realm"], "master");
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_is_validation_error() -> anyhow::Result<()> {
    let app = test_app(None).await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/csp-infos")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
