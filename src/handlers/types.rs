//! # Common API Types
//!
//! Shared response shapes and small parsing helpers used by several handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::RepositoryError;

/// Identifier of a newly created record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
}

impl From<Uuid> for IdResponse {
    fn from(id: Uuid) -> Self {
        Self { id }
    }
}

/// List of record identifiers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdListResponse {
    pub ids: Vec<Uuid>,
}

/// Identifiers returned when an AppServe app is registered with its first task
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppServeAppIdsResponse {
    pub app_serve_app_id: Uuid,
    pub task_id: Uuid,
}

/// Health probe result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Parses an upper-case enum wire name such as `PROMETHEUS` taken from a path segment.
pub fn parse_wire_enum<T>(kind: &str, raw: &str) -> Result<T, RepositoryError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| RepositoryError::invalid_argument(format!("invalid {} {}", kind, raw)))
}
