//! Migration to create the app_serve_app_tasks table.
//!
//! Tasks form the append-only deployment history of an app-serve app.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppServeAppTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppServeAppTasks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppServeAppTasks::AppServeAppId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AppServeAppTasks::Version).text().not_null())
                    .col(ColumnDef::new(AppServeAppTasks::Strategy).text().not_null())
                    .col(ColumnDef::new(AppServeAppTasks::Status).text().not_null())
                    .col(
                        ColumnDef::new(AppServeAppTasks::Output)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(AppServeAppTasks::ArtifactUrl).text().not_null())
                    .col(ColumnDef::new(AppServeAppTasks::ImageUrl).text().not_null())
                    .col(
                        ColumnDef::new(AppServeAppTasks::ExecutablePath)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AppServeAppTasks::ResourceSpec).text().not_null())
                    .col(ColumnDef::new(AppServeAppTasks::Profile).text().not_null())
                    .col(ColumnDef::new(AppServeAppTasks::AppConfig).text().not_null())
                    .col(ColumnDef::new(AppServeAppTasks::AppSecret).text().not_null())
                    .col(ColumnDef::new(AppServeAppTasks::ExtraEnv).text().not_null())
                    .col(ColumnDef::new(AppServeAppTasks::Port).text().not_null())
                    .col(
                        ColumnDef::new(AppServeAppTasks::HelmRevision)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AppServeAppTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AppServeAppTasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_serve_app_tasks_app_id")
                            .from(AppServeAppTasks::Table, AppServeAppTasks::AppServeAppId)
                            .to(AppServeApps::Table, AppServeApps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_app_serve_app_tasks_app_created")
                    .table(AppServeAppTasks::Table)
                    .col(AppServeAppTasks::AppServeAppId)
                    .col(AppServeAppTasks::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_app_serve_app_tasks_app_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AppServeAppTasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AppServeAppTasks {
    Table,
    Id,
    AppServeAppId,
    Version,
    Strategy,
    Status,
    Output,
    ArtifactUrl,
    ImageUrl,
    ExecutablePath,
    ResourceSpec,
    Profile,
    AppConfig,
    AppSecret,
    ExtraEnv,
    Port,
    HelmRevision,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AppServeApps {
    Table,
    Id,
}
