//! # Cluster API Handlers
//!
//! Cluster registration, lookup and the status callbacks used by the workflow engine.

use crate::error::{ApiError, RepositoryError};
use crate::handlers::types::IdResponse;
use crate::identifier::{parse_id, parse_optional_id};
use crate::models::cluster::{ClusterConf, ClusterResponse, ClusterStatus};
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

/// Request payload for registering a cluster
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateClusterRequest {
    pub contract_id: String,
    pub csp_id: String,
    #[schema(example = "tks-prod-1")]
    pub name: String,
    #[serde(default)]
    pub conf: ClusterConf,
}

/// Cluster listing filters. At most one may be given; with none the default contract is used.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListClustersQuery {
    pub contract_id: Option<String>,
    pub csp_id: Option<String>,
}

/// Status callback payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateClusterStatusRequest {
    pub status: ClusterStatus,
    #[serde(default)]
    pub status_desc: String,
    #[serde(default)]
    pub workflow_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateKubeconfigRequest {
    pub kubeconfig: String,
}

#[utoipa::path(
    post,
    path = "/clusters",
    request_body = CreateClusterRequest,
    responses(
        (status = 201, description = "Cluster created", body = IdResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "CSP not found", body = ApiError)
    ),
    tag = "clusters"
)]
pub async fn create_cluster(
    State(state): State<AppState>,
    payload: Result<Json<CreateClusterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let Json(request) = payload?;
    let contract_id = parse_id("contract", &request.contract_id)?;
    let csp_id = parse_id("csp", &request.csp_id)?;

    let id = state
        .registries
        .clusters
        .create(contract_id, csp_id, &request.name, &request.conf)
        .await?;

    Ok((StatusCode::CREATED, Json(id.into())))
}

#[utoipa::path(
    get,
    path = "/clusters/{id}",
    params(("id" = String, Path, description = "Cluster ID")),
    responses(
        (status = 200, description = "Cluster", body = ClusterResponse),
        (status = 400, description = "Malformed ID", body = ApiError),
        (status = 404, description = "Cluster not found", body = ApiError)
    ),
    tag = "clusters"
)]
pub async fn get_cluster(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClusterResponse>, ApiError> {
    let id = parse_id("cluster", &id)?;
    let cluster = state.registries.clusters.get(id).await?;
    Ok(Json(cluster.into()))
}

#[utoipa::path(
    get,
    path = "/clusters",
    params(ListClustersQuery),
    responses(
        (status = 200, description = "Clusters", body = [ClusterResponse]),
        (status = 400, description = "Both filters given or malformed ID", body = ApiError),
        (status = 404, description = "No cluster for the CSP", body = ApiError),
        (status = 503, description = "Contract service unavailable", body = ApiError)
    ),
    tag = "clusters"
)]
pub async fn list_clusters(
    State(state): State<AppState>,
    query: Result<Query<ListClustersQuery>, QueryRejection>,
) -> Result<Json<Vec<ClusterResponse>>, ApiError> {
    let Query(query) = query?;
    let contract_id = parse_optional_id("contract", query.contract_id.as_deref())?;
    let csp_id = parse_optional_id("csp", query.csp_id.as_deref())?;

    let clusters = match (contract_id, csp_id) {
        (Some(_), Some(_)) => {
            return Err(RepositoryError::invalid_argument(
                "contract_id and csp_id cannot be combined",
            )
            .into());
        }
        (None, Some(csp_id)) => state.registries.clusters.list_by_csp(csp_id).await?,
        (Some(contract_id), None) => {
            state
                .registries
                .clusters
                .list_by_contract(contract_id)
                .await?
        }
        (None, None) => {
            let contract_id = state.contracts.default_contract().await?;
            state
                .registries
                .clusters
                .list_by_contract(contract_id)
                .await?
        }
    };

    Ok(Json(clusters.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/clusters/{id}/status",
    params(("id" = String, Path, description = "Cluster ID")),
    request_body = UpdateClusterStatusRequest,
    responses(
        (status = 204, description = "Status recorded"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Cluster not found", body = ApiError)
    ),
    tag = "clusters"
)]
pub async fn update_cluster_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateClusterStatusRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id("cluster", &id)?;
    let Json(request) = payload?;

    state
        .registries
        .clusters
        .update_status(id, request.status, &request.status_desc, &request.workflow_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/clusters/{id}/kubeconfig",
    params(("id" = String, Path, description = "Cluster ID")),
    request_body = UpdateKubeconfigRequest,
    responses(
        (status = 204, description = "Kubeconfig stored"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Cluster not found", body = ApiError)
    ),
    tag = "clusters"
)]
pub async fn update_cluster_kubeconfig(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateKubeconfigRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id("cluster", &id)?;
    let Json(request) = payload?;

    state
        .registries
        .clusters
        .update_kubeconfig(id, &request.kubeconfig)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
