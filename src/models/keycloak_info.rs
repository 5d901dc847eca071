//! Keycloak info entity model
//!
//! Identity broker settings for a cluster. A cluster may carry several.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "keycloak_infos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub cluster_id: Uuid,

    pub realm: String,

    pub client_id: String,

    pub secret: String,

    pub private_key: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KeycloakInfoResponse {
    pub id: Uuid,
    pub cluster_id: Uuid,
    pub realm: String,
    pub client_id: String,
    pub secret: String,
    pub private_key: String,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, example = "2026-01-01T12:00:00Z")]
    pub updated_at: DateTimeWithTimeZone,
}

impl From<Model> for KeycloakInfoResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            cluster_id: model.cluster_id,
            realm: model.realm,
            client_id: model.client_id,
            secret: model.secret,
            private_key: model.private_key,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
