//! Application group repository
//!
//! Groups are scoped by cluster. A non-empty external label may appear at most once per
//! cluster; deleting a group removes its applications in the same transaction.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::identifier;
use crate::models::app_group::{self, AppGroupStatus, AppGroupType, Entity as AppGroup};
use crate::models::application::{self, Entity as Application};

/// Fields accepted when creating a group.
#[derive(Debug, Clone, Default)]
pub struct NewAppGroup {
    pub name: String,
    pub group_type: AppGroupType,
    pub subtype: String,
    pub status: AppGroupStatus,
    pub workflow_id: String,
    pub external_label: String,
    /// UUID string, or empty when unknown
    pub creator: String,
    pub description: String,
}

/// Repository for application group records
#[derive(Debug, Clone)]
pub struct AppGroupRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl AppGroupRepository {
    /// Creates a new AppGroupRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a group inside a cluster.
    ///
    /// Fails with `Conflict` when another group in the same cluster already carries the
    /// requested external label, and with `InvalidArgument` when the creator is not a UUID or
    /// the label lookup itself fails.
    pub async fn create(
        &self,
        cluster_id: Uuid,
        group: NewAppGroup,
    ) -> Result<Uuid, RepositoryError> {
        if !group.external_label.is_empty() {
            let existing = AppGroup::find()
                .filter(app_group::Column::ClusterId.eq(cluster_id))
                .filter(app_group::Column::ExternalLabel.eq(group.external_label.as_str()))
                .count(&*self.db)
                .await
                .map_err(|err| {
                    RepositoryError::invalid_argument(format!(
                        "failed to check external label {}: {}",
                        group.external_label, err
                    ))
                })?;

            if existing > 0 {
                return Err(RepositoryError::Conflict(format!(
                    "app group with external label {} already exists in cluster {}",
                    group.external_label, cluster_id
                )));
            }
        }

        let creator = if group.creator.trim().is_empty() {
            Uuid::nil()
        } else {
            identifier::parse_id("creator", &group.creator)?
        };

        let id = identifier::new_id();
        let now = identifier::now();

        let record = app_group::ActiveModel {
            id: Set(id),
            name: Set(group.name),
            cluster_id: Set(cluster_id),
            group_type: Set(group.group_type),
            subtype: Set(group.subtype),
            status: Set(group.status),
            status_desc: Set(String::new()),
            workflow_id: Set(group.workflow_id),
            external_label: Set(group.external_label),
            creator: Set(creator),
            description: Set(group.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        AppGroup::insert(record)
            .exec_without_returning(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(app_group_id = %id, cluster_id = %cluster_id, group_type = ?group.group_type, "Created app group");
        Ok(id)
    }

    /// One page of a cluster's groups, oldest first. May be empty.
    ///
    /// # Arguments
    ///
    /// * `cluster_id` - Owning cluster
    /// * `offset` - Rows to skip
    /// * `limit` - Maximum rows to return
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `offset` or `limit` does not fit a signed 64-bit SQL integer.
    pub async fn get_by_cluster(
        &self,
        cluster_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<app_group::Model>, RepositoryError> {
        let offset = page_bound("offset", offset)?;
        let limit = page_bound("limit", limit)?;

        AppGroup::find()
            .filter(app_group::Column::ClusterId.eq(cluster_id))
            .order_by_asc(app_group::Column::CreatedAt)
            .order_by_asc(app_group::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Groups matching the name and/or type. At least one filter is required and an empty
    /// result is `NotFound`.
    pub async fn get_by_name_or_type(
        &self,
        name: &str,
        group_type: AppGroupType,
    ) -> Result<Vec<app_group::Model>, RepositoryError> {
        if name.is_empty() && group_type == AppGroupType::Unspecified {
            return Err(RepositoryError::invalid_argument(
                "either app group name or type must be given",
            ));
        }

        let condition = Condition::all()
            .add_option((!name.is_empty()).then(|| app_group::Column::Name.eq(name)))
            .add_option(
                (group_type != AppGroupType::Unspecified)
                    .then(|| app_group::Column::GroupType.eq(group_type)),
            );

        let groups = AppGroup::find()
            .filter(condition)
            .order_by_asc(app_group::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if groups.is_empty() {
            return Err(RepositoryError::NotFound(format!(
                "no app groups with name '{}' and type {:?}",
                name, group_type
            )));
        }
        Ok(groups)
    }

    /// Finds a group by ID
    ///
    /// # Errors
    ///
    /// `NotFound` when no group has this ID.
    pub async fn get(&self, id: Uuid) -> Result<app_group::Model, RepositoryError> {
        AppGroup::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("app group", id))
    }

    /// Overwrites status, description and workflow ID. Transitions are not validated.
    ///
    /// # Arguments
    ///
    /// * `id` - Group to update
    /// * `status` - New lifecycle status
    /// * `status_desc` - Free-form detail reported by the workflow
    /// * `workflow_id` - Workflow that produced the status
    ///
    /// # Errors
    ///
    /// `NotFound` when no row was updated.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: AppGroupStatus,
        status_desc: &str,
        workflow_id: &str,
    ) -> Result<(), RepositoryError> {
        let result = AppGroup::update_many()
            .col_expr(app_group::Column::Status, Expr::value(status.to_value()))
            .col_expr(app_group::Column::StatusDesc, Expr::value(status_desc.to_string()))
            .col_expr(app_group::Column::WorkflowId, Expr::value(workflow_id.to_string()))
            .col_expr(app_group::Column::UpdatedAt, Expr::value(identifier::now()))
            .filter(app_group::Column::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("app group", id));
        }

        tracing::info!(app_group_id = %id, status = ?status, workflow_id, "Updated app group status");
        Ok(())
    }

    /// Deletes the group and then its applications in one transaction.
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let removed = AppGroup::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        if removed.rows_affected == 0 {
            return Err(RepositoryError::not_found("app group", id));
        }

        let children = Application::delete_many()
            .filter(application::Column::AppGroupId.eq(id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            app_group_id = %id,
            applications_removed = children.rows_affected,
            "Deleted app group"
        );
        Ok(())
    }
}

/// Paging values are bound as signed 64-bit integers.
fn page_bound(name: &str, value: u64) -> Result<u64, RepositoryError> {
    match i64::try_from(value) {
        Ok(_) => Ok(value),
        Err(_) => Err(RepositoryError::invalid_argument(format!(
            "{} {} is out of range",
            name, value
        ))),
    }
}
