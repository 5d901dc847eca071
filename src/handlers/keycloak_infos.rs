//! # Keycloak Info API Handlers

use crate::error::ApiError;
use crate::handlers::types::IdResponse;
use crate::identifier::parse_id;
use crate::models::keycloak_info::KeycloakInfoResponse;
use crate::repositories::NewKeycloakInfo;
use crate::server::AppState;
use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateKeycloakInfoRequest {
    #[schema(example = "master")]
    pub realm: String,
    pub client_id: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub private_key: String,
}

#[utoipa::path(
    post,
    path = "/clusters/{id}/keycloak-infos",
    params(("id" = String, Path, description = "Cluster ID")),
    request_body = CreateKeycloakInfoRequest,
    responses(
        (status = 201, description = "Keycloak info created", body = IdResponse),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tag = "keycloak-infos"
)]
pub async fn create_keycloak_info(
    State(state): State<AppState>,
    Path(cluster_id): Path<String>,
    payload: Result<Json<CreateKeycloakInfoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let cluster_id = parse_id("cluster", &cluster_id)?;
    let Json(request) = payload?;

    let info = NewKeycloakInfo {
        realm: request.realm,
        client_id: request.client_id,
        secret: request.secret,
        private_key: request.private_key,
    };
    let id = state
        .registries
        .keycloak_infos
        .create(cluster_id, info)
        .await?;

    Ok((StatusCode::CREATED, Json(id.into())))
}

#[utoipa::path(
    get,
    path = "/clusters/{id}/keycloak-infos",
    params(("id" = String, Path, description = "Cluster ID")),
    responses(
        (status = 200, description = "Keycloak infos of the cluster", body = [KeycloakInfoResponse]),
        (status = 400, description = "Malformed ID", body = ApiError)
    ),
    tag = "keycloak-infos"
)]
pub async fn list_keycloak_infos(
    State(state): State<AppState>,
    Path(cluster_id): Path<String>,
) -> Result<Json<Vec<KeycloakInfoResponse>>, ApiError> {
    let cluster_id = parse_id("cluster", &cluster_id)?;
    let infos = state
        .registries
        .keycloak_infos
        .list_by_cluster(cluster_id)
        .await?;
    Ok(Json(infos.into_iter().map(Into::into).collect()))
}
