//! Cluster registry tests against an in-memory database.

#[path = "test_utils/mod.rs"]
mod test_utils;

use inventory::error::RepositoryError;
use inventory::models::cluster::ClusterStatus;
use test_utils::{create_test_cluster, create_test_csp, setup_registries, test_cluster_conf};
use uuid::Uuid;

#[tokio::test]
async fn create_stores_conf_and_starts_unspecified() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let contract_id = Uuid::new_v4();
    let csp_id = create_test_csp(&registries, contract_id).await?;

    let id = create_test_cluster(&registries, contract_id, csp_id, "tks-1").await?;
    let cluster = registries.clusters.get(id).await?;

    assert_eq!(cluster.status, ClusterStatus::Unspecified);
    assert_eq!(cluster.conf(), test_cluster_conf());
    assert_eq!(cluster.region, "ap-northeast-2");
    assert_eq!(cluster.num_of_az, 3);
    assert!(cluster.kubeconfig.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_with_missing_csp_is_not_found_and_inserts_nothing() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let contract_id = Uuid::new_v4();

    let err = registries
        .clusters
        .create(contract_id, Uuid::new_v4(), "orphan", &test_cluster_conf())
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));

    let clusters = registries.clusters.list_by_contract(contract_id).await?;
    assert!(clusters.is_empty());
    Ok(())
}

#[tokio::test]
async fn list_by_contract_may_be_empty() -> anyhow::Result<()> {
    let registries = setup_registries().await?;

    let clusters = registries.clusters.list_by_contract(Uuid::new_v4()).await?;
    assert!(clusters.is_empty());
    Ok(())
}

#[tokio::test]
async fn list_by_csp_returns_clusters_or_not_found() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let contract_id = Uuid::new_v4();
    let csp_id = create_test_csp(&registries, contract_id).await?;
    let idle_csp = create_test_csp(&registries, contract_id).await?;

    create_test_cluster(&registries, contract_id, csp_id, "a").await?;
    create_test_cluster(&registries, contract_id, csp_id, "b").await?;

    let clusters = registries.clusters.list_by_csp(csp_id).await?;
    assert_eq!(clusters.len(), 2);
    assert!(clusters.iter().all(|c| c.csp_id == csp_id));

    let err = registries.clusters.list_by_csp(idle_csp).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn status_updates_overwrite_without_validation() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let contract_id = Uuid::new_v4();
    let csp_id = create_test_csp(&registries, contract_id).await?;
    let id = create_test_cluster(&registries, contract_id, csp_id, "tks").await?;

    registries
        .clusters
        .update_status(id, ClusterStatus::Installing, "provisioning", "wf-1")
        .await?;
    registries
        .clusters
        .update_status(id, ClusterStatus::Running, "done", "wf-1")
        .await?;
    // Going backwards is accepted as-is.
    registries
        .clusters
        .update_status(id, ClusterStatus::Installing, "reinstall", "wf-2")
        .await?;

    let cluster = registries.clusters.get(id).await?;
    assert_eq!(cluster.status, ClusterStatus::Installing);
    assert_eq!(cluster.status_desc, "reinstall");
    assert_eq!(cluster.workflow_id, "wf-2");
    Ok(())
}

#[tokio::test]
async fn updates_on_unknown_cluster_are_not_found() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let missing = Uuid::new_v4();

    let err = registries
        .clusters
        .update_status(missing, ClusterStatus::Running, "", "")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));

    let err = registries
        .clusters
        .update_kubeconfig(missing, "apiVersion: v1")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn kubeconfig_is_stored() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let contract_id = Uuid::new_v4();
    let csp_id = create_test_csp(&registries, contract_id).await?;
    let id = create_test_cluster(&registries, contract_id, csp_id, "tks").await?;

    registries
        .clusters
        .update_kubeconfig(id, "apiVersion: v1\nkind: Config\n")
        .await?;

    assert_eq!(
        registries.clusters.get(id).await?.kubeconfig,
        "apiVersion: v1\nkind: Config\n"
    );
    Ok(())
}
