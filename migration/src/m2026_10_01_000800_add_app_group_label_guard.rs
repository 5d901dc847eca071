//! Enforces one non-empty external label per cluster with a partial unique index.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Postgres and SQLite both accept IF NOT EXISTS and a WHERE clause here.
        manager
            .get_connection()
            .execute(Statement::from_string(
                manager.get_database_backend(),
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_application_groups_cluster_label_unique \
                 ON application_groups (cluster_id, external_label) \
                 WHERE external_label <> ''"
                    .to_string(),
            ))
            .await
            .map(|_| ())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute(Statement::from_string(
                manager.get_database_backend(),
                "DROP INDEX IF EXISTS idx_application_groups_cluster_label_unique".to_string(),
            ))
            .await
            .map(|_| ())
    }
}
