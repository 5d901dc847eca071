//! Migration to create the application_groups table.
//!
//! External label uniqueness only applies to non-empty labels, so it is enforced by the
//! registry and the `(cluster_id, external_label)` index is a plain lookup index.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApplicationGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApplicationGroups::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ApplicationGroups::Name).text().not_null())
                    .col(ColumnDef::new(ApplicationGroups::ClusterId).uuid().not_null())
                    .col(
                        ColumnDef::new(ApplicationGroups::GroupType)
                            .text()
                            .not_null()
                            .default("UNSPECIFIED"),
                    )
                    .col(
                        ColumnDef::new(ApplicationGroups::Subtype)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ApplicationGroups::Status)
                            .text()
                            .not_null()
                            .default("UNSPECIFIED"),
                    )
                    .col(
                        ColumnDef::new(ApplicationGroups::StatusDesc)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ApplicationGroups::WorkflowId)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ApplicationGroups::ExternalLabel)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ApplicationGroups::Creator).uuid().not_null())
                    .col(
                        ColumnDef::new(ApplicationGroups::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ApplicationGroups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ApplicationGroups::UpdatedAt)
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
                    .name("idx_application_groups_cluster_label")
                    .table(ApplicationGroups::Table)
                    .col(ApplicationGroups::ClusterId)
                    .col(ApplicationGroups::ExternalLabel)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_application_groups_name")
                    .table(ApplicationGroups::Table)
                    .col(ApplicationGroups::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_application_groups_cluster_label")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_application_groups_name").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ApplicationGroups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ApplicationGroups {
    Table,
    Id,
    Name,
    ClusterId,
    GroupType,
    Subtype,
    Status,
    StatusDesc,
    WorkflowId,
    ExternalLabel,
    Creator,
    Description,
    CreatedAt,
    UpdatedAt,
}
