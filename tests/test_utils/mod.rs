//! Test utilities for database testing.
//!
//! In-memory SQLite databases with every migration applied, plus fixture helpers that go
//! through the real registries.

use anyhow::Result;
use inventory::models::cluster::ClusterConf;
use inventory::models::csp_info::CspType;
use inventory::repositories::Registries;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use std::sync::Arc;
use uuid::Uuid;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    // Referential checks are done by the registries; keep SQLite from enforcing them so
    // fixtures can reference parents that were never inserted.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = OFF".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Sets up an in-memory SQLite database with all migrations applied and returns an Arc.
#[allow(dead_code)]
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(db))
}

/// Builds every registry on top of a fresh database.
#[allow(dead_code)]
pub async fn setup_registries() -> Result<Registries> {
    let db = setup_test_db_arc().await?;
    Ok(Registries::new(db))
}

/// Registers an AWS CSP under the contract.
#[allow(dead_code)]
pub async fn create_test_csp(registries: &Registries, contract_id: Uuid) -> Result<Uuid> {
    Ok(registries
        .csp_infos
        .create(contract_id, "test-aws", "{\"key\":\"secret\"}", CspType::Aws)
        .await?)
}

/// Registers a three-AZ cluster under the CSP.
#[allow(dead_code)]
pub async fn create_test_cluster(
    registries: &Registries,
    contract_id: Uuid,
    csp_id: Uuid,
    name: &str,
) -> Result<Uuid> {
    Ok(registries
        .clusters
        .create(contract_id, csp_id, name, &test_cluster_conf())
        .await?)
}

/// Provisioning parameters used by cluster fixtures.
#[allow(dead_code)]
pub fn test_cluster_conf() -> ClusterConf {
    ClusterConf {
        ssh_key_name: "tks-key".to_string(),
        region: "ap-northeast-2".to_string(),
        num_of_az: 3,
        machine_type: "t3.large".to_string(),
        min_size_per_az: 1,
        max_size_per_az: 5,
    }
}
