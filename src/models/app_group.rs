//! Application group entity model
//!
//! A named set of applications deployed together onto a cluster. Within a cluster a
//! non-empty `external_label` identifies at most one group.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "application_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub cluster_id: Uuid,

    pub group_type: AppGroupType,

    /// Free-form refinement of the group type (e.g. `LOKI`)
    pub subtype: String,

    pub status: AppGroupStatus,

    pub status_desc: String,

    pub workflow_id: String,

    /// Empty when the caller did not supply one
    pub external_label: String,

    /// Nil UUID when unknown
    pub creator: Uuid,

    pub description: String,

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
pub enum AppGroupType {
    #[sea_orm(string_value = "UNSPECIFIED")]
    #[serde(rename = "UNSPECIFIED")]
    #[default]
    Unspecified,

    #[sea_orm(string_value = "LMA")]
    #[serde(rename = "LMA")]
    Lma,

    #[sea_orm(string_value = "SERVICE_MESH")]
    #[serde(rename = "SERVICE_MESH")]
    ServiceMesh,
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
pub enum AppGroupStatus {
    #[sea_orm(string_value = "UNSPECIFIED")]
    #[serde(rename = "UNSPECIFIED")]
    #[default]
    Unspecified,

    #[sea_orm(string_value = "INSTALLING")]
    #[serde(rename = "INSTALLING")]
    Installing,

    #[sea_orm(string_value = "RUNNING")]
    #[serde(rename = "RUNNING")]
    Running,

    #[sea_orm(string_value = "ERROR")]
    #[serde(rename = "ERROR")]
    Error,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::application::Entity")]
    Application,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppGroupResponse {
    pub id: Uuid,
    pub name: String,
    pub cluster_id: Uuid,
    #[serde(rename = "type")]
    pub group_type: AppGroupType,
    pub subtype: String,
    pub status: AppGroupStatus,
    pub status_desc: String,
    pub workflow_id: String,
    pub external_label: String,
    pub creator: Uuid,
    pub description: String,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Model> for AppGroupResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            cluster_id: model.cluster_id,
            group_type: model.group_type,
            subtype: model.subtype,
            status: model.status,
            status_desc: model.status_desc,
            workflow_id: model.workflow_id,
            external_label: model.external_label,
            creator: model.creator,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
