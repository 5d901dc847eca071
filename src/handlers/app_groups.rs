//! # Application Group API Handlers

use crate::error::ApiError;
use crate::handlers::types::IdResponse;
use crate::identifier::parse_id;
use crate::models::app_group::{AppGroupResponse, AppGroupStatus, AppGroupType};
use crate::repositories::NewAppGroup;
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

/// Request payload for creating an application group
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAppGroupRequest {
    #[schema(example = "lma-main")]
    pub name: String,
    #[serde(rename = "type", default)]
    pub group_type: AppGroupType,
    #[serde(default)]
    #[schema(example = "LOKI")]
    pub subtype: String,
    #[serde(default)]
    pub status: AppGroupStatus,
    #[serde(default)]
    pub workflow_id: String,
    /// Unique within the cluster when non-empty
    #[serde(default)]
    pub external_label: String,
    /// UUID of the requesting user, empty when unknown
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub description: String,
}

impl From<CreateAppGroupRequest> for NewAppGroup {
    fn from(request: CreateAppGroupRequest) -> Self {
        Self {
            name: request.name,
            group_type: request.group_type,
            subtype: request.subtype,
            status: request.status,
            workflow_id: request.workflow_id,
            external_label: request.external_label,
            creator: request.creator,
            description: request.description,
        }
    }
}

/// Offset pagination for a cluster's groups
#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListAppGroupsQuery {
    pub offset: Option<u64>,
    /// Defaults to the configured page size
    pub limit: Option<u64>,
}

/// Lookup filters; at least one is required
#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct FindAppGroupsQuery {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub group_type: Option<AppGroupType>,
}

/// Status callback payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateAppGroupStatusRequest {
    pub status: AppGroupStatus,
    #[serde(default)]
    pub status_desc: String,
    #[serde(default)]
    pub workflow_id: String,
}

#[utoipa::path(
    post,
    path = "/clusters/{id}/app-groups",
    params(("id" = String, Path, description = "Cluster ID")),
    request_body = CreateAppGroupRequest,
    responses(
        (status = 201, description = "Application group created", body = IdResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "External label already used in the cluster", body = ApiError)
    ),
    tag = "app-groups"
)]
pub async fn create_app_group(
    State(state): State<AppState>,
    Path(cluster_id): Path<String>,
    payload: Result<Json<CreateAppGroupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let cluster_id = parse_id("cluster", &cluster_id)?;
    let Json(request) = payload?;

    let id = state
        .registries
        .app_groups
        .create(cluster_id, request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(id.into())))
}

#[utoipa::path(
    get,
    path = "/clusters/{id}/app-groups",
    params(("id" = String, Path, description = "Cluster ID"), ListAppGroupsQuery),
    responses(
        (status = 200, description = "One page of application groups", body = [AppGroupResponse]),
        (status = 400, description = "Malformed ID or out-of-range paging", body = ApiError)
    ),
    tag = "app-groups"
)]
pub async fn list_cluster_app_groups(
    State(state): State<AppState>,
    Path(cluster_id): Path<String>,
    query: Result<Query<ListAppGroupsQuery>, QueryRejection>,
) -> Result<Json<Vec<AppGroupResponse>>, ApiError> {
    let cluster_id = parse_id("cluster", &cluster_id)?;
    let Query(query) = query?;

    let offset = query.offset.unwrap_or(0);
    let limit = query
        .limit
        .filter(|limit| *limit > 0)
        .unwrap_or(state.config.app_group_page_size);

    let groups = state
        .registries
        .app_groups
        .get_by_cluster(cluster_id, offset, limit)
        .await?;

    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/app-groups",
    params(FindAppGroupsQuery),
    responses(
        (status = 200, description = "Matching application groups", body = [AppGroupResponse]),
        (status = 400, description = "No filter given", body = ApiError),
        (status = 404, description = "No matching group", body = ApiError)
    ),
    tag = "app-groups"
)]
pub async fn find_app_groups(
    State(state): State<AppState>,
    query: Result<Query<FindAppGroupsQuery>, QueryRejection>,
) -> Result<Json<Vec<AppGroupResponse>>, ApiError> {
    let Query(query) = query?;
    let name = query.name.unwrap_or_default();

    let groups = state
        .registries
        .app_groups
        .get_by_name_or_type(name.trim(), query.group_type.unwrap_or_default())
        .await?;

    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/app-groups/{id}",
    params(("id" = String, Path, description = "Application group ID")),
    responses(
        (status = 200, description = "Application group", body = AppGroupResponse),
        (status = 400, description = "Malformed ID", body = ApiError),
        (status = 404, description = "Application group not found", body = ApiError)
    ),
    tag = "app-groups"
)]
pub async fn get_app_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AppGroupResponse>, ApiError> {
    let id = parse_id("app group", &id)?;
    let group = state.registries.app_groups.get(id).await?;
    Ok(Json(group.into()))
}

#[utoipa::path(
    put,
    path = "/app-groups/{id}/status",
    params(("id" = String, Path, description = "Application group ID")),
    request_body = UpdateAppGroupStatusRequest,
    responses(
        (status = 204, description = "Status recorded"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Application group not found", body = ApiError)
    ),
    tag = "app-groups"
)]
pub async fn update_app_group_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAppGroupStatusRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id("app group", &id)?;
    let Json(request) = payload?;

    state
        .registries
        .app_groups
        .update_status(id, request.status, &request.status_desc, &request.workflow_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/app-groups/{id}",
    params(("id" = String, Path, description = "Application group ID")),
    responses(
        (status = 204, description = "Group and its applications deleted"),
        (status = 400, description = "Malformed ID", body = ApiError),
        (status = 404, description = "Application group not found", body = ApiError)
    ),
    tag = "app-groups"
)]
pub async fn delete_app_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id("app group", &id)?;
    state.registries.app_groups.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
