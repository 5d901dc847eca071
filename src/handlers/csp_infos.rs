//! # CSP Info API Handlers
//!
//! Registration of cloud provider accounts and rotation of their credentials.

use crate::error::ApiError;
use crate::handlers::types::{IdListResponse, IdResponse};
use crate::identifier::parse_id;
use crate::models::csp_info::{CspInfoResponse, CspType};
use crate::server::AppState;
use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request payload for registering a CSP account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCspInfoRequest {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub contract_id: String,
    #[schema(example = "production-aws")]
    pub name: String,
    /// Opaque credential blob
    #[serde(default)]
    pub auth: String,
    #[serde(rename = "type", default)]
    pub csp_type: CspType,
}

/// Credential blob of a CSP account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CspAuthBody {
    pub auth: String,
}

#[utoipa::path(
    post,
    path = "/csp-infos",
    request_body = CreateCspInfoRequest,
    responses(
        (status = 201, description = "CSP info created", body = IdResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "csp-infos"
)]
pub async fn create_csp_info(
    State(state): State<AppState>,
    payload: Result<Json<CreateCspInfoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let Json(request) = payload?;
    let contract_id = parse_id("contract", &request.contract_id)?;

    let id = state
        .registries
        .csp_infos
        .create(contract_id, &request.name, &request.auth, request.csp_type)
        .await?;

    Ok((StatusCode::CREATED, Json(id.into())))
}

#[utoipa::path(
    get,
    path = "/csp-infos/{id}",
    params(("id" = String, Path, description = "CSP info ID")),
    responses(
        (status = 200, description = "CSP info", body = CspInfoResponse),
        (status = 400, description = "Malformed ID", body = ApiError),
        (status = 404, description = "CSP info not found", body = ApiError)
    ),
    tag = "csp-infos"
)]
pub async fn get_csp_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CspInfoResponse>, ApiError> {
    let id = parse_id("csp", &id)?;
    let record = state.registries.csp_infos.get(id).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    get,
    path = "/csp-infos/{id}/auth",
    params(("id" = String, Path, description = "CSP info ID")),
    responses(
        (status = 200, description = "Credential blob", body = CspAuthBody),
        (status = 400, description = "Malformed ID", body = ApiError),
        (status = 404, description = "CSP info not found", body = ApiError)
    ),
    tag = "csp-infos"
)]
pub async fn get_csp_auth(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CspAuthBody>, ApiError> {
    let id = parse_id("csp", &id)?;
    let auth = state.registries.csp_infos.get_auth(id).await?;
    Ok(Json(CspAuthBody { auth }))
}

#[utoipa::path(
    put,
    path = "/csp-infos/{id}/auth",
    params(("id" = String, Path, description = "CSP info ID")),
    request_body = CspAuthBody,
    responses(
        (status = 204, description = "Credential rotated"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "CSP info not found", body = ApiError)
    ),
    tag = "csp-infos"
)]
pub async fn update_csp_auth(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CspAuthBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id("csp", &id)?;
    let Json(body) = payload?;
    state.registries.csp_infos.update_auth(id, &body.auth).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/contracts/{contract_id}/csp-ids",
    params(("contract_id" = String, Path, description = "Contract ID")),
    responses(
        (status = 200, description = "CSP IDs registered under the contract", body = IdListResponse),
        (status = 400, description = "Malformed ID", body = ApiError),
        (status = 404, description = "No CSP registered for the contract", body = ApiError)
    ),
    tag = "csp-infos"
)]
pub async fn list_csp_ids_by_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<String>,
) -> Result<Json<IdListResponse>, ApiError> {
    let contract_id = parse_id("contract", &contract_id)?;
    let ids = state
        .registries
        .csp_infos
        .list_ids_by_contract(contract_id)
        .await?;
    Ok(Json(IdListResponse { ids }))
}
