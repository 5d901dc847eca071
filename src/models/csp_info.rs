//! CSP info entity model
//!
//! Cloud-service-provider credentials registered under a contract. The `auth` blob is
//! opaque to this service.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "csp_infos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning contract (external entity, referenced by ID only)
    pub contract_id: Uuid,

    pub name: String,

    /// Opaque credential blob
    pub auth: String,

    pub csp_type: CspType,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

/// Cloud provider kind
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
pub enum CspType {
    #[sea_orm(string_value = "UNSPECIFIED")]
    #[serde(rename = "UNSPECIFIED")]
    #[default]
    Unspecified,

    #[sea_orm(string_value = "AWS")]
    #[serde(rename = "AWS")]
    Aws,

    #[sea_orm(string_value = "AZURE")]
    #[serde(rename = "AZURE")]
    Azure,

    #[sea_orm(string_value = "GCP")]
    #[serde(rename = "GCP")]
    Gcp,

    #[sea_orm(string_value = "OPENSTACK")]
    #[serde(rename = "OPENSTACK")]
    Openstack,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cluster::Entity")]
    Cluster,
}

impl Related<super::cluster::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cluster.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Public representation; the credential is only exposed through the auth endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CspInfoResponse {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub csp_type: CspType,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Model> for CspInfoResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            contract_id: model.contract_id,
            name: model.name,
            csp_type: model.csp_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
