//! Migration to create the app_serve_apps table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppServeApps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppServeApps::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AppServeApps::Name).text().not_null())
                    .col(ColumnDef::new(AppServeApps::ContractId).uuid().not_null())
                    .col(
                        ColumnDef::new(AppServeApps::ServeType)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AppServeApps::AppType)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AppServeApps::TargetClusterId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AppServeApps::EndpointUrl).text().not_null())
                    .col(
                        ColumnDef::new(AppServeApps::PreviewEndpointUrl)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppServeApps::Status)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AppServeApps::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AppServeApps::UpdatedAt)
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
                    .name("idx_app_serve_apps_contract_created")
                    .table(AppServeApps::Table)
                    .col(AppServeApps::ContractId)
                    .col(AppServeApps::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_app_serve_apps_contract_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AppServeApps::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AppServeApps {
    Table,
    Id,
    Name,
    ContractId,
    ServeType,
    AppType,
    TargetClusterId,
    EndpointUrl,
    PreviewEndpointUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}
