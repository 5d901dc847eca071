//! # Application API Handlers

use crate::error::ApiError;
use crate::handlers::types::parse_wire_enum;
use crate::identifier::parse_id;
use crate::models::application::{AppType, ApplicationResponse};
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

#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListApplicationsQuery {
    /// Restrict to one application type
    #[serde(rename = "type")]
    pub app_type: Option<AppType>,
}

/// Endpoint and metadata reported for an application
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpsertApplicationRequest {
    #[schema(example = "https://grafana.example.com")]
    pub endpoint: String,
    /// Opaque, typically JSON
    #[serde(default)]
    pub metadata: String,
}

#[utoipa::path(
    get,
    path = "/app-groups/{id}/applications",
    params(("id" = String, Path, description = "Application group ID"), ListApplicationsQuery),
    responses(
        (status = 200, description = "Applications of the group", body = [ApplicationResponse]),
        (status = 400, description = "Malformed ID or type", body = ApiError),
        (status = 404, description = "Group has no applications", body = ApiError)
    ),
    tag = "applications"
)]
pub async fn list_applications(
    State(state): State<AppState>,
    Path(app_group_id): Path<String>,
    query: Result<Query<ListApplicationsQuery>, QueryRejection>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let app_group_id = parse_id("app group", &app_group_id)?;
    let Query(query) = query?;

    let applications = match query.app_type {
        Some(app_type) => {
            state
                .registries
                .applications
                .list_by_group_and_type(app_group_id, app_type)
                .await?
        }
        None => {
            state
                .registries
                .applications
                .list_by_group(app_group_id)
                .await?
        }
    };

    Ok(Json(applications.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/app-groups/{id}/applications/{type}",
    params(
        ("id" = String, Path, description = "Application group ID"),
        ("type" = AppType, Path, description = "Application type")
    ),
    request_body = UpsertApplicationRequest,
    responses(
        (status = 204, description = "Application stored"),
        (status = 400, description = "Malformed ID or type", body = ApiError)
    ),
    tag = "applications"
)]
pub async fn upsert_application(
    State(state): State<AppState>,
    Path((app_group_id, app_type)): Path<(String, String)>,
    payload: Result<Json<UpsertApplicationRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let app_group_id = parse_id("app group", &app_group_id)?;
    let app_type: AppType = parse_wire_enum("application type", &app_type)?;
    let Json(request) = payload?;

    state
        .registries
        .applications
        .upsert(app_group_id, app_type, &request.endpoint, &request.metadata)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
