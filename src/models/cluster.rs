//! Cluster entity model
//!
//! A provisioned Kubernetes cluster owned by a CSP. Status is advisory bookkeeping driven by
//! the external workflow engine; transitions are not validated here.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clusters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub contract_id: Uuid,

    pub csp_id: Uuid,

    pub status: ClusterStatus,

    pub status_desc: String,

    /// Identifier of the workflow that last reported status
    pub workflow_id: String,

    pub ssh_key_name: String,

    pub region: String,

    pub num_of_az: i32,

    pub machine_type: String,

    pub min_size_per_az: i32,

    pub max_size_per_az: i32,

    /// Filled in once provisioning completes
    pub kubeconfig: String,

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
pub enum ClusterStatus {
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

/// Provisioning parameters stored verbatim on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClusterConf {
    #[serde(default)]
    pub ssh_key_name: String,
    #[serde(default)]
    #[schema(example = "ap-northeast-2")]
    pub region: String,
    #[serde(default)]
    #[schema(example = 3)]
    pub num_of_az: i32,
    #[serde(default)]
    pub machine_type: String,
    #[serde(default)]
    pub min_size_per_az: i32,
    #[serde(default)]
    pub max_size_per_az: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::csp_info::Entity",
        from = "Column::CspId",
        to = "super::csp_info::Column::Id"
    )]
    CspInfo,
}

impl Related<super::csp_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CspInfo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn conf(&self) -> ClusterConf {
        ClusterConf {
            ssh_key_name: self.ssh_key_name.clone(),
            region: self.region.clone(),
            num_of_az: self.num_of_az,
            machine_type: self.machine_type.clone(),
            min_size_per_az: self.min_size_per_az,
            max_size_per_az: self.max_size_per_az,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClusterResponse {
    pub id: Uuid,
    pub name: String,
    pub contract_id: Uuid,
    pub csp_id: Uuid,
    pub status: ClusterStatus,
    pub status_desc: String,
    pub workflow_id: String,
    pub conf: ClusterConf,
    pub kubeconfig: String,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Model> for ClusterResponse {
    fn from(model: Model) -> Self {
        let conf = model.conf();
        Self {
            id: model.id,
            name: model.name,
            contract_id: model.contract_id,
            csp_id: model.csp_id,
            status: model.status,
            status_desc: model.status_desc,
            workflow_id: model.workflow_id,
            conf,
            kubeconfig: model.kubeconfig,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
