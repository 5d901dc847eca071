//! Application entity model
//!
//! Endpoint and metadata of one application inside a group, keyed by `(app_group_id, app_type)`.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub app_group_id: Uuid,

    pub app_type: AppType,

    pub endpoint: String,

    /// Opaque blob, typically JSON; never parsed here
    pub metadata: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    Default,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum AppType {
    #[sea_orm(string_value = "UNSPECIFIED")]
    #[serde(rename = "UNSPECIFIED")]
    #[default]
    Unspecified,

    #[sea_orm(string_value = "THANOS")]
    #[serde(rename = "THANOS")]
    Thanos,

    #[sea_orm(string_value = "PROMETHEUS")]
    #[serde(rename = "PROMETHEUS")]
    Prometheus,

    #[sea_orm(string_value = "GRAFANA")]
    #[serde(rename = "GRAFANA")]
    Grafana,

    #[sea_orm(string_value = "KIALI")]
    #[serde(rename = "KIALI")]
    Kiali,

    #[sea_orm(string_value = "KIBANA")]
    #[serde(rename = "KIBANA")]
    Kibana,

    #[sea_orm(string_value = "ELASTICSEARCH")]
    #[serde(rename = "ELASTICSEARCH")]
    Elasticsearch,

    #[sea_orm(string_value = "CLOUD_CONSOLE")]
    #[serde(rename = "CLOUD_CONSOLE")]
    CloudConsole,

    #[sea_orm(string_value = "HORIZON")]
    #[serde(rename = "HORIZON")]
    Horizon,

    #[sea_orm(string_value = "JAEGER")]
    #[serde(rename = "JAEGER")]
    Jaeger,

    #[sea_orm(string_value = "KUBERNETES_DASHBOARD")]
    #[serde(rename = "KUBERNETES_DASHBOARD")]
    KubernetesDashboard,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::app_group::Entity",
        from = "Column::AppGroupId",
        to = "super::app_group::Column::Id"
    )]
    AppGroup,
}

impl Related<super::app_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub app_group_id: Uuid,
    #[serde(rename = "type")]
    pub app_type: AppType,
    pub endpoint: String,
    pub metadata: String,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Model> for ApplicationResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            app_group_id: model.app_group_id,
            app_type: model.app_type,
            endpoint: model.endpoint,
            metadata: model.metadata,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
