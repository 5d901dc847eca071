//! Database migrations for the inventory service.
//!
//! One migration per registry table, applied in dependency order, followed by constraint
//! guards that need raw SQL.

pub use sea_orm_migration::prelude::*;

mod m2026_10_01_000100_create_csp_infos;
mod m2026_10_01_000200_create_clusters;
mod m2026_10_01_000300_create_application_groups;
mod m2026_10_01_000400_create_applications;
mod m2026_10_01_000500_create_app_serve_apps;
mod m2026_10_01_000600_create_app_serve_app_tasks;
mod m2026_10_01_000700_create_keycloak_infos;
mod m2026_10_01_000800_add_app_group_label_guard;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_10_01_000100_create_csp_infos::Migration),
            Box::new(m2026_10_01_000200_create_clusters::Migration),
            Box::new(m2026_10_01_000300_create_application_groups::Migration),
            Box::new(m2026_10_01_000400_create_applications::Migration),
            Box::new(m2026_10_01_000500_create_app_serve_apps::Migration),
            Box::new(m2026_10_01_000600_create_app_serve_app_tasks::Migration),
            Box::new(m2026_10_01_000700_create_keycloak_infos::Migration),
            Box::new(m2026_10_01_000800_add_app_group_label_guard::Migration),
        ]
    }
}
