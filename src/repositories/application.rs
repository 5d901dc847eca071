//! Application repository
//!
//! Applications are addressed by `(app_group_id, app_type)`. Writes go through
//! [`ApplicationRepository::upsert`].

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::identifier;
use crate::models::application::{self, AppType, Entity as Application};

/// Repository for application records
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ApplicationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Every application in the group. An empty result is `NotFound`.
    pub async fn list_by_group(
        &self,
        app_group_id: Uuid,
    ) -> Result<Vec<application::Model>, RepositoryError> {
        let apps = Application::find()
            .filter(application::Column::AppGroupId.eq(app_group_id))
            .order_by_asc(application::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if apps.is_empty() {
            return Err(RepositoryError::NotFound(format!(
                "no applications for app group {}",
                app_group_id
            )));
        }
        Ok(apps)
    }

    /// Applications of one type in the group. May be empty.
    pub async fn list_by_group_and_type(
        &self,
        app_group_id: Uuid,
        app_type: AppType,
    ) -> Result<Vec<application::Model>, RepositoryError> {
        Application::find()
            .filter(application::Column::AppGroupId.eq(app_group_id))
            .filter(application::Column::AppType.eq(app_type))
            .order_by_asc(application::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Overwrites endpoint and metadata of the `(group, type)` row, inserting it when absent.
    ///
    /// Runs as one `INSERT .. ON CONFLICT (app_group_id, app_type) DO UPDATE` statement, so
    /// concurrent first writers of the same key both succeed and the last one wins. The row's
    /// `id` and `created_at` survive later upserts.
    ///
    /// # Arguments
    ///
    /// * `app_group_id` - Owning group
    /// * `app_type` - Application kind, unique within the group
    /// * `endpoint` - Endpoint URL
    /// * `metadata` - Opaque blob, stored as given
    pub async fn upsert(
        &self,
        app_group_id: Uuid,
        app_type: AppType,
        endpoint: &str,
        metadata: &str,
    ) -> Result<(), RepositoryError> {
        let now = identifier::now();
        let record = application::ActiveModel {
            id: Set(identifier::new_id()),
            app_group_id: Set(app_group_id),
            app_type: Set(app_type),
            endpoint: Set(endpoint.to_string()),
            metadata: Set(metadata.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Application::insert(record)
            .on_conflict(
                OnConflict::columns([application::Column::AppGroupId, application::Column::AppType])
                    .update_columns([
                        application::Column::Endpoint,
                        application::Column::Metadata,
                        application::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            app_group_id = %app_group_id,
            app_type = ?app_type,
            "Upserted application"
        );
        Ok(())
    }
}
