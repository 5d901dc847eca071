//! AppServe application entity model
//!
//! An independently tracked deployment with its own task history. Status mirrors the status
//! of the most recently updated task.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::app_serve_app_task::AppServeAppTaskResponse;

/// Endpoint placeholder until a deployment reports its URLs.
pub const ENDPOINT_NOT_AVAILABLE: &str = "N/A";

/// Terminal status hidden from listings unless explicitly requested.
pub const STATUS_DELETE_SUCCESS: &str = "DELETE_SUCCESS";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "app_serve_apps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub contract_id: Uuid,

    /// Deployment kind, e.g. `build` or `deploy`
    pub serve_type: String,

    /// Workload kind, e.g. `springboot`
    pub app_type: String,

    pub target_cluster_id: Uuid,

    pub endpoint_url: String,

    pub preview_endpoint_url: String,

    pub status: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::app_serve_app_task::Entity")]
    Task,
}

impl Related<super::app_serve_app_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppServeAppResponse {
    pub id: Uuid,
    pub name: String,
    pub contract_id: Uuid,
    #[serde(rename = "type")]
    pub serve_type: String,
    pub app_type: String,
    pub target_cluster_id: Uuid,
    pub endpoint_url: String,
    pub preview_endpoint_url: String,
    pub status: String,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Model> for AppServeAppResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            contract_id: model.contract_id,
            serve_type: model.serve_type,
            app_type: model.app_type,
            target_cluster_id: model.target_cluster_id,
            endpoint_url: model.endpoint_url,
            preview_endpoint_url: model.preview_endpoint_url,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// An app together with its full task history, newest task first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppServeAppWithTasks {
    pub app: AppServeAppResponse,
    pub tasks: Vec<AppServeAppTaskResponse>,
}
