//! AppServe task entity model
//!
//! One deployment attempt of an AppServe application. Rows are only ever appended; later
//! updates touch status, output and helm revision.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "app_serve_app_tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub app_serve_app_id: Uuid,

    pub version: String,

    pub strategy: String,

    pub status: String,

    pub output: String,

    pub artifact_url: String,

    pub image_url: String,

    pub executable_path: String,

    pub resource_spec: String,

    pub profile: String,

    pub app_config: String,

    pub app_secret: String,

    pub extra_env: String,

    pub port: String,

    pub helm_revision: i32,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::app_serve_app::Entity",
        from = "Column::AppServeAppId",
        to = "super::app_serve_app::Column::Id"
    )]
    AppServeApp,
}

impl Related<super::app_serve_app::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppServeApp.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Caller supplied fields of a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TaskSpec {
    #[schema(example = "v1")]
    pub version: String,
    #[schema(example = "rolling-update")]
    pub strategy: String,
    #[schema(example = "PREPARING")]
    pub status: String,
    pub artifact_url: String,
    pub image_url: String,
    pub executable_path: String,
    pub resource_spec: String,
    pub profile: String,
    pub app_config: String,
    pub app_secret: String,
    pub extra_env: String,
    #[schema(example = "8080")]
    pub port: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppServeAppTaskResponse {
    pub id: Uuid,
    pub app_serve_app_id: Uuid,
    pub version: String,
    pub strategy: String,
    pub status: String,
    pub output: String,
    pub artifact_url: String,
    pub image_url: String,
    pub executable_path: String,
    pub resource_spec: String,
    pub profile: String,
    pub app_config: String,
    pub app_secret: String,
    pub extra_env: String,
    pub port: String,
    pub helm_revision: i32,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Model> for AppServeAppTaskResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            app_serve_app_id: model.app_serve_app_id,
            version: model.version,
            strategy: model.strategy,
            status: model.status,
            output: model.output,
            artifact_url: model.artifact_url,
            image_url: model.image_url,
            executable_path: model.executable_path,
            resource_spec: model.resource_spec,
            profile: model.profile,
            app_config: model.app_config,
            app_secret: model.app_secret,
            extra_env: model.extra_env,
            port: model.port,
            helm_revision: model.helm_revision,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
