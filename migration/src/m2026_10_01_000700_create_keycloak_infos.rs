//! Migration to create the keycloak_infos table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KeycloakInfos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(KeycloakInfos::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(KeycloakInfos::ClusterId).uuid().not_null())
                    .col(ColumnDef::new(KeycloakInfos::Realm).text().not_null())
                    .col(ColumnDef::new(KeycloakInfos::ClientId).text().not_null())
                    .col(ColumnDef::new(KeycloakInfos::Secret).text().not_null())
                    .col(ColumnDef::new(KeycloakInfos::PrivateKey).text().not_null())
                    .col(
                        ColumnDef::new(KeycloakInfos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(KeycloakInfos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_keycloak_infos_cluster_id")
                    .table(KeycloakInfos::Table)
                    .col(KeycloakInfos::ClusterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_keycloak_infos_cluster_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(KeycloakInfos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum KeycloakInfos {
    Table,
    Id,
    ClusterId,
    Realm,
    ClientId,
    Secret,
    PrivateKey,
    CreatedAt,
    UpdatedAt,
}
