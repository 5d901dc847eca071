//! Keycloak info repository

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::identifier;
use crate::models::keycloak_info::{self, Entity as KeycloakInfo};

/// Fields accepted when registering identity broker settings.
#[derive(Debug, Clone, Default)]
pub struct NewKeycloakInfo {
    pub realm: String,
    pub client_id: String,
    pub secret: String,
    pub private_key: String,
}

/// Repository for per-cluster Keycloak client settings
#[derive(Debug, Clone)]
pub struct KeycloakInfoRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl KeycloakInfoRepository {
    /// Creates a new KeycloakInfoRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Records Keycloak client settings for a cluster and returns the new ID.
    ///
    /// # Arguments
    ///
    /// * `cluster_id` - Cluster the realm belongs to
    /// * `info` - Realm, client ID and key material, stored as given
    pub async fn create(
        &self,
        cluster_id: Uuid,
        info: NewKeycloakInfo,
    ) -> Result<Uuid, RepositoryError> {
        let id = identifier::new_id();
        let now = identifier::now();

        let record = keycloak_info::ActiveModel {
            id: Set(id),
            cluster_id: Set(cluster_id),
            realm: Set(info.realm),
            client_id: Set(info.client_id),
            secret: Set(info.secret),
            private_key: Set(info.private_key),
            created_at: Set(now),
            updated_at: Set(now),
        };

        KeycloakInfo::insert(record)
            .exec_without_returning(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(keycloak_info_id = %id, cluster_id = %cluster_id, "Created keycloak info");
        Ok(id)
    }

    /// Settings registered for a cluster, oldest first. May be empty.
    pub async fn list_by_cluster(
        &self,
        cluster_id: Uuid,
    ) -> Result<Vec<keycloak_info::Model>, RepositoryError> {
        KeycloakInfo::find()
            .filter(keycloak_info::Column::ClusterId.eq(cluster_id))
            .order_by_asc(keycloak_info::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
