//! Migration to create the clusters table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clusters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clusters::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clusters::Name).text().not_null())
                    .col(ColumnDef::new(Clusters::ContractId).uuid().not_null())
                    .col(ColumnDef::new(Clusters::CspId).uuid().not_null())
                    .col(
                        ColumnDef::new(Clusters::Status)
                            .text()
                            .not_null()
                            .default("UNSPECIFIED"),
                    )
                    .col(
                        ColumnDef::new(Clusters::StatusDesc)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Clusters::WorkflowId)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Clusters::SshKeyName).text().not_null())
                    .col(ColumnDef::new(Clusters::Region).text().not_null())
                    .col(ColumnDef::new(Clusters::NumOfAz).integer().not_null())
                    .col(ColumnDef::new(Clusters::MachineType).text().not_null())
                    .col(ColumnDef::new(Clusters::MinSizePerAz).integer().not_null())
                    .col(ColumnDef::new(Clusters::MaxSizePerAz).integer().not_null())
                    .col(
                        ColumnDef::new(Clusters::Kubeconfig)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Clusters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Clusters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clusters_csp_id")
                            .from(Clusters::Table, Clusters::CspId)
                            .to(CspInfos::Table, CspInfos::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_clusters_contract_id")
                    .table(Clusters::Table)
                    .col(Clusters::ContractId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_clusters_csp_id")
                    .table(Clusters::Table)
                    .col(Clusters::CspId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_clusters_contract_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_clusters_csp_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Clusters::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clusters {
    Table,
    Id,
    Name,
    ContractId,
    CspId,
    Status,
    StatusDesc,
    WorkflowId,
    SshKeyName,
    Region,
    NumOfAz,
    MachineType,
    MinSizePerAz,
    MaxSizePerAz,
    Kubeconfig,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CspInfos {
    Table,
    Id,
}
