//! # AppServe API Handlers
//!
//! Registration of AppServe deployments, their task history and the callbacks that report
//! task status and deployed endpoints.

use crate::error::ApiError;
use crate::handlers::types::{AppServeAppIdsResponse, IdResponse};
use crate::identifier::parse_id;
use crate::models::app_serve_app::{AppServeAppResponse, AppServeAppWithTasks};
use crate::models::app_serve_app_task::TaskSpec;
use crate::repositories::NewAppServeApp;
use crate::server::AppState;
use axum::{
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Request payload for registering an app with its first task
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAppServeAppRequest {
    pub contract_id: String,
    #[schema(example = "petstore")]
    pub name: String,
    /// Deployment kind, e.g. `build` or `deploy`
    #[serde(rename = "type", default)]
    pub serve_type: String,
    #[serde(default)]
    #[schema(example = "springboot")]
    pub app_type: String,
    pub target_cluster_id: String,
    #[serde(default)]
    pub task: TaskSpec,
}

#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListAppServeAppsQuery {
    pub contract_id: String,
    /// Include apps whose status is `DELETE_SUCCESS`
    #[serde(default)]
    pub show_all: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateTaskStatusRequest {
    #[schema(example = "DEPLOY_SUCCESS")]
    pub status: String,
    #[serde(default)]
    pub output: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateEndpointRequest {
    pub task_id: String,
    pub endpoint_url: String,
    #[serde(default)]
    pub preview_endpoint_url: String,
    #[serde(default)]
    pub helm_revision: i32,
}

#[utoipa::path(
    post,
    path = "/app-serve-apps",
    request_body = CreateAppServeAppRequest,
    responses(
        (status = 201, description = "App and initial task created", body = AppServeAppIdsResponse),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tag = "app-serve-apps"
)]
pub async fn create_app_serve_app(
    State(state): State<AppState>,
    payload: Result<Json<CreateAppServeAppRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AppServeAppIdsResponse>), ApiError> {
    let Json(request) = payload?;
    let contract_id = parse_id("contract", &request.contract_id)?;
    let target_cluster_id = parse_id("cluster", &request.target_cluster_id)?;

    let app = NewAppServeApp {
        name: request.name,
        serve_type: request.serve_type,
        app_type: request.app_type,
        target_cluster_id,
    };

    let (app_serve_app_id, task_id) = state
        .registries
        .app_serve_apps
        .create(contract_id, app, request.task)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AppServeAppIdsResponse {
            app_serve_app_id,
            task_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/app-serve-apps",
    params(ListAppServeAppsQuery),
    responses(
        (status = 200, description = "Apps of the contract, newest first", body = [AppServeAppResponse]),
        (status = 400, description = "Malformed contract ID", body = ApiError)
    ),
    tag = "app-serve-apps"
)]
pub async fn list_app_serve_apps(
    State(state): State<AppState>,
    query: Result<Query<ListAppServeAppsQuery>, QueryRejection>,
) -> Result<Json<Vec<AppServeAppResponse>>, ApiError> {
    let Query(query) = query?;
    let contract_id = parse_id("contract", &query.contract_id)?;

    let apps = state
        .registries
        .app_serve_apps
        .list(contract_id, query.show_all)
        .await?;

    Ok(Json(apps.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/app-serve-apps/{id}",
    params(("id" = String, Path, description = "AppServe app ID")),
    responses(
        (status = 200, description = "App with every task, newest first", body = AppServeAppWithTasks),
        (status = 400, description = "Malformed ID", body = ApiError),
        (status = 404, description = "App not found", body = ApiError)
    ),
    tag = "app-serve-apps"
)]
pub async fn get_app_serve_app(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AppServeAppWithTasks>, ApiError> {
    let id = parse_id("app serve app", &id)?;
    let (app, tasks) = state.registries.app_serve_apps.get(id).await?;

    Ok(Json(AppServeAppWithTasks {
        app: app.into(),
        tasks: tasks.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/app-serve-apps/{id}/tasks",
    params(("id" = String, Path, description = "AppServe app ID")),
    request_body = TaskSpec,
    responses(
        (status = 201, description = "Task appended", body = IdResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "App not found", body = ApiError)
    ),
    tag = "app-serve-apps"
)]
pub async fn append_app_serve_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskSpec>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let id = parse_id("app serve app", &id)?;
    let Json(task) = payload?;

    let task_id = state.registries.app_serve_apps.append_task(id, task).await?;

    Ok((StatusCode::CREATED, Json(task_id.into())))
}

#[utoipa::path(
    put,
    path = "/app-serve-app-tasks/{task_id}/status",
    params(("task_id" = String, Path, description = "AppServe task ID")),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 204, description = "Task and app status updated"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Task or app not found", body = ApiError)
    ),
    tag = "app-serve-apps"
)]
pub async fn update_app_serve_task_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<UpdateTaskStatusRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let task_id = parse_id("app serve task", &task_id)?;
    let Json(request) = payload?;

    state
        .registries
        .app_serve_apps
        .update_task_status(task_id, &request.status, &request.output)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/app-serve-apps/{id}/endpoint",
    params(("id" = String, Path, description = "AppServe app ID")),
    request_body = UpdateEndpointRequest,
    responses(
        (status = 204, description = "Endpoints and helm revision recorded"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "App or task not found", body = ApiError)
    ),
    tag = "app-serve-apps"
)]
pub async fn update_app_serve_endpoint(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEndpointRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id("app serve app", &id)?;
    let Json(request) = payload?;
    let task_id = parse_id("app serve task", &request.task_id)?;

    state
        .registries
        .app_serve_apps
        .update_endpoint(
            id,
            task_id,
            &request.endpoint_url,
            &request.preview_endpoint_url,
            request.helm_revision,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
