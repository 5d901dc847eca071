//! Application group and application registry tests against an in-memory database.

#[path = "test_utils/mod.rs"]
mod test_utils;

use inventory::error::RepositoryError;
use inventory::identifier;
use inventory::models::app_group::{self, AppGroupStatus, AppGroupType};
use inventory::models::AppGroup;
use inventory::models::application::AppType;
use inventory::repositories::NewAppGroup;
use sea_orm::{EntityTrait, Set};
use test_utils::setup_registries;
use uuid::Uuid;

fn lma_group(name: &str, label: &str) -> NewAppGroup {
    NewAppGroup {
        name: name.to_string(),
        group_type: AppGroupType::Lma,
        subtype: "LOKI".to_string(),
        external_label: label.to_string(),
        ..NewAppGroup::default()
    }
}

#[tokio::test]
async fn create_defaults_creator_and_status() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let cluster_id = Uuid::new_v4();

    let id = registries
        .app_groups
        .create(cluster_id, lma_group("lma", ""))
        .await?;
    let group = registries.app_groups.get(id).await?;

    assert_eq!(group.cluster_id, cluster_id);
    assert_eq!(group.creator, Uuid::nil());
    assert_eq!(group.status, AppGroupStatus::Unspecified);
    assert_eq!(group.subtype, "LOKI");
    Ok(())
}

#[tokio::test]
async fn create_keeps_requested_status_and_creator() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let creator = Uuid::new_v4();

    let id = registries
        .app_groups
        .create(
            Uuid::new_v4(),
            NewAppGroup {
                status: AppGroupStatus::Installing,
                creator: creator.to_string(),
                ..lma_group("lma", "")
            },
        )
        .await?;

    let group = registries.app_groups.get(id).await?;
    assert_eq!(group.status, AppGroupStatus::Installing);
    assert_eq!(group.creator, creator);
    Ok(())
}

#[tokio::test]
async fn malformed_creator_is_invalid_argument() -> anyhow::Result<()> {
    let registries = setup_registries().await?;

    let err = registries
        .app_groups
        .create(
            Uuid::new_v4(),
            NewAppGroup {
                creator: "someone".to_string(),
                ..lma_group("lma", "")
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidArgument(_)));
    Ok(())
}

#[tokio::test]
async fn duplicate_external_label_in_cluster_conflicts() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let cluster_id = Uuid::new_v4();

    registries
        .app_groups
        .create(cluster_id, lma_group("first", "X"))
        .await?;
    let err = registries
        .app_groups
        .create(cluster_id, lma_group("second", "X"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    // Same label on another cluster is fine.
    registries
        .app_groups
        .create(Uuid::new_v4(), lma_group("third", "X"))
        .await?;
    Ok(())
}

fn raw_group(cluster_id: Uuid, label: &str) -> app_group::ActiveModel {
    let now = identifier::now();
    app_group::ActiveModel {
        id: Set(identifier::new_id()),
        name: Set("raw".to_string()),
        cluster_id: Set(cluster_id),
        group_type: Set(AppGroupType::Lma),
        subtype: Set(String::new()),
        status: Set(AppGroupStatus::Unspecified),
        status_desc: Set(String::new()),
        workflow_id: Set(String::new()),
        external_label: Set(label.to_string()),
        creator: Set(Uuid::nil()),
        description: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[tokio::test]
async fn external_label_uniqueness_is_enforced_by_the_table() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let db = registries.app_groups.db.clone();
    let cluster_id = Uuid::new_v4();

    registries
        .app_groups
        .create(cluster_id, lma_group("first", "X"))
        .await?;

    // A writer that skipped the label lookup still hits the index.
    let err = AppGroup::insert(raw_group(cluster_id, "X"))
        .exec_without_returning(&*db)
        .await
        .map_err(RepositoryError::database_error)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    AppGroup::insert(raw_group(cluster_id, ""))
        .exec_without_returning(&*db)
        .await?;
    AppGroup::insert(raw_group(cluster_id, ""))
        .exec_without_returning(&*db)
        .await?;
    Ok(())
}

#[tokio::test]
async fn empty_external_labels_never_conflict() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let cluster_id = Uuid::new_v4();

    registries
        .app_groups
        .create(cluster_id, lma_group("a", ""))
        .await?;
    registries
        .app_groups
        .create(cluster_id, lma_group("b", ""))
        .await?;

    let groups = registries
        .app_groups
        .get_by_cluster(cluster_id, 0, 10)
        .await?;
    assert_eq!(groups.len(), 2);
    Ok(())
}

#[tokio::test]
async fn get_by_cluster_pages_in_creation_order() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let cluster_id = Uuid::new_v4();

    for name in ["g0", "g1", "g2"] {
        registries
            .app_groups
            .create(cluster_id, lma_group(name, ""))
            .await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let page = registries
        .app_groups
        .get_by_cluster(cluster_id, 1, 10)
        .await?;
    let names: Vec<_> = page.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["g1", "g2"]);

    let empty = registries
        .app_groups
        .get_by_cluster(Uuid::new_v4(), 0, 10)
        .await?;
    assert!(empty.is_empty());
    Ok(())
}

#[tokio::test]
async fn get_by_cluster_rejects_paging_beyond_sql_range() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let cluster_id = Uuid::new_v4();
    registries
        .app_groups
        .create(cluster_id, lma_group("only", ""))
        .await?;

    let err = registries
        .app_groups
        .get_by_cluster(cluster_id, 0, u64::MAX)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidArgument(_)));

    let err = registries
        .app_groups
        .get_by_cluster(cluster_id, i64::MAX as u64 + 1, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidArgument(_)));

    let page = registries
        .app_groups
        .get_by_cluster(cluster_id, 0, i64::MAX as u64)
        .await?;
    assert_eq!(page.len(), 1);
    Ok(())
}

#[tokio::test]
async fn get_by_name_or_type_requires_a_filter() -> anyhow::Result<()> {
    let registries = setup_registries().await?;

    let err = registries
        .app_groups
        .get_by_name_or_type("", AppGroupType::Unspecified)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidArgument(_)));
    Ok(())
}

#[tokio::test]
async fn get_by_name_or_type_matches_either_filter() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let cluster_id = Uuid::new_v4();

    registries
        .app_groups
        .create(cluster_id, lma_group("observability", ""))
        .await?;
    registries
        .app_groups
        .create(
            cluster_id,
            NewAppGroup {
                group_type: AppGroupType::ServiceMesh,
                ..lma_group("mesh", "")
            },
        )
        .await?;

    let by_name = registries
        .app_groups
        .get_by_name_or_type("observability", AppGroupType::Unspecified)
        .await?;
    assert_eq!(by_name.len(), 1);

    let by_type = registries
        .app_groups
        .get_by_name_or_type("", AppGroupType::ServiceMesh)
        .await?;
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0].name, "mesh");

    let err = registries
        .app_groups
        .get_by_name_or_type("missing", AppGroupType::Unspecified)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn update_status_overwrites_or_reports_missing() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let id = registries
        .app_groups
        .create(Uuid::new_v4(), lma_group("lma", ""))
        .await?;

    registries
        .app_groups
        .update_status(id, AppGroupStatus::Running, "installed", "wf-9")
        .await?;
    let group = registries.app_groups.get(id).await?;
    assert_eq!(group.status, AppGroupStatus::Running);
    assert_eq!(group.workflow_id, "wf-9");

    let err = registries
        .app_groups
        .update_status(Uuid::new_v4(), AppGroupStatus::Error, "", "")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn delete_cascades_to_applications() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let group_id = registries
        .app_groups
        .create(Uuid::new_v4(), lma_group("lma", ""))
        .await?;
    let other_group = registries
        .app_groups
        .create(Uuid::new_v4(), lma_group("other", ""))
        .await?;

    registries
        .applications
        .upsert(group_id, AppType::Grafana, "https://grafana", "{}")
        .await?;
    registries
        .applications
        .upsert(group_id, AppType::Prometheus, "https://prom", "{}")
        .await?;
    registries
        .applications
        .upsert(other_group, AppType::Grafana, "https://grafana-2", "{}")
        .await?;

    registries.app_groups.delete(group_id).await?;

    let err = registries.app_groups.get(group_id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
    let err = registries
        .applications
        .list_by_group(group_id)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));

    assert_eq!(
        registries.applications.list_by_group(other_group).await?.len(),
        1
    );
    Ok(())
}

#[tokio::test]
async fn delete_without_applications_succeeds() -> anyhow::Result<()> {
    let registries = setup_registries().await?;
    let group_id = registries
        .app_groups
        .create(Uuid::new_v4(), lma_group("lma", ""))
        .await?;

    registries.app_groups.delete(group_id).await?;

    let err = registries.app_groups.delete(group_id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
    Ok(())
}
