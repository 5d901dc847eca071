//! Migration to create the csp_infos table.
//!
//! Stores cloud-service-provider credentials registered under a contract.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CspInfos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CspInfos::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CspInfos::ContractId).uuid().not_null())
                    .col(ColumnDef::new(CspInfos::Name).text().not_null())
                    .col(ColumnDef::new(CspInfos::Auth).text().not_null())
                    .col(
                        ColumnDef::new(CspInfos::CspType)
                            .text()
                            .not_null()
                            .default("UNSPECIFIED"),
                    )
                    .col(
                        ColumnDef::new(CspInfos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CspInfos::UpdatedAt)
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
                    .name("idx_csp_infos_contract_id")
                    .table(CspInfos::Table)
                    .col(CspInfos::ContractId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_csp_infos_contract_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CspInfos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CspInfos {
    Table,
    Id,
    ContractId,
    Name,
    Auth,
    CspType,
    CreatedAt,
    UpdatedAt,
}
