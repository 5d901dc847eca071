//! AppServe application repository
//!
//! Apps carry an append-only task history. Status changes on a task are propagated to the
//! parent app in the same transaction.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::identifier;
use crate::models::app_serve_app::{
    self, ENDPOINT_NOT_AVAILABLE, Entity as AppServeApp, STATUS_DELETE_SUCCESS,
};
use crate::models::app_serve_app_task::{self, Entity as AppServeAppTask, TaskSpec};

/// Fields accepted when registering an app.
#[derive(Debug, Clone, Default)]
pub struct NewAppServeApp {
    pub name: String,
    pub serve_type: String,
    pub app_type: String,
    pub target_cluster_id: Uuid,
}

/// Repository for AppServe apps and their tasks
#[derive(Debug, Clone)]
pub struct AppServeAppRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl AppServeAppRepository {
    /// Creates a new AppServeAppRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Inserts the app and its first task in one transaction.
    ///
    /// Endpoints start as `N/A` and the app status mirrors the initial task status.
    /// Returns `(app_id, task_id)`.
    pub async fn create(
        &self,
        contract_id: Uuid,
        app: NewAppServeApp,
        task: TaskSpec,
    ) -> Result<(Uuid, Uuid), RepositoryError> {
        let app_id = identifier::new_id();
        let now = identifier::now();

        let record = app_serve_app::ActiveModel {
            id: Set(app_id),
            name: Set(app.name),
            contract_id: Set(contract_id),
            serve_type: Set(app.serve_type),
            app_type: Set(app.app_type),
            target_cluster_id: Set(app.target_cluster_id),
            endpoint_url: Set(ENDPOINT_NOT_AVAILABLE.to_string()),
            preview_endpoint_url: Set(ENDPOINT_NOT_AVAILABLE.to_string()),
            status: Set(task.status.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        AppServeApp::insert(record)
            .exec_without_returning(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        let task_id = insert_task(&txn, app_id, task).await?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            app_serve_app_id = %app_id,
            task_id = %task_id,
            contract_id = %contract_id,
            "Created app serve app"
        );
        Ok((app_id, task_id))
    }

    /// Appends a task to an existing app. The app row is left untouched.
    pub async fn append_task(&self, app_id: Uuid, task: TaskSpec) -> Result<Uuid, RepositoryError> {
        let exists = AppServeApp::find_by_id(app_id)
            .count(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        if exists == 0 {
            return Err(RepositoryError::not_found("app serve app", app_id));
        }

        let task_id = insert_task(&*self.db, app_id, task).await?;

        tracing::info!(app_serve_app_id = %app_id, task_id = %task_id, "Appended app serve task");
        Ok(task_id)
    }

    /// Sets status and output on a task and copies the status onto its parent app.
    ///
    /// # Errors
    ///
    /// `NotFound` when the task or its parent app is missing. Either way nothing is kept.
    pub async fn update_task_status(
        &self,
        task_id: Uuid,
        status: &str,
        output: &str,
    ) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;
        let now = identifier::now();

        let updated = AppServeAppTask::update_many()
            .col_expr(app_serve_app_task::Column::Status, Expr::value(status.to_string()))
            .col_expr(app_serve_app_task::Column::Output, Expr::value(output.to_string()))
            .col_expr(app_serve_app_task::Column::UpdatedAt, Expr::value(now))
            .filter(app_serve_app_task::Column::Id.eq(task_id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        if updated.rows_affected == 0 {
            return Err(RepositoryError::not_found("app serve task", task_id));
        }

        let task = AppServeAppTask::find_by_id(task_id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("app serve task", task_id))?;

        let parent = AppServeApp::update_many()
            .col_expr(app_serve_app::Column::Status, Expr::value(status.to_string()))
            .col_expr(app_serve_app::Column::UpdatedAt, Expr::value(now))
            .filter(app_serve_app::Column::Id.eq(task.app_serve_app_id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        if parent.rows_affected == 0 {
            return Err(RepositoryError::not_found(
                "app serve app",
                task.app_serve_app_id,
            ));
        }

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            app_serve_app_id = %task.app_serve_app_id,
            task_id = %task_id,
            status,
            "Updated app serve task status"
        );
        Ok(())
    }

    /// Records deployed endpoints on the app and the helm revision on the task.
    pub async fn update_endpoint(
        &self,
        app_id: Uuid,
        task_id: Uuid,
        endpoint: &str,
        preview_endpoint: &str,
        helm_revision: i32,
    ) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;
        let now = identifier::now();

        let app = AppServeApp::update_many()
            .col_expr(app_serve_app::Column::EndpointUrl, Expr::value(endpoint.to_string()))
            .col_expr(
                app_serve_app::Column::PreviewEndpointUrl,
                Expr::value(preview_endpoint.to_string()),
            )
            .col_expr(app_serve_app::Column::UpdatedAt, Expr::value(now))
            .filter(app_serve_app::Column::Id.eq(app_id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        if app.rows_affected == 0 {
            return Err(RepositoryError::not_found("app serve app", app_id));
        }

        let task = AppServeAppTask::update_many()
            .col_expr(app_serve_app_task::Column::HelmRevision, Expr::value(helm_revision))
            .col_expr(app_serve_app_task::Column::UpdatedAt, Expr::value(now))
            .filter(app_serve_app_task::Column::Id.eq(task_id))
            .filter(app_serve_app_task::Column::AppServeAppId.eq(app_id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        if task.rows_affected == 0 {
            return Err(RepositoryError::not_found("app serve task", task_id));
        }

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            app_serve_app_id = %app_id,
            task_id = %task_id,
            helm_revision,
            "Updated app serve endpoint"
        );
        Ok(())
    }

    /// Apps of a contract, newest first. `DELETE_SUCCESS` apps are skipped unless
    /// `include_deleted` is set.
    pub async fn list(
        &self,
        contract_id: Uuid,
        include_deleted: bool,
    ) -> Result<Vec<app_serve_app::Model>, RepositoryError> {
        let mut query = AppServeApp::find().filter(app_serve_app::Column::ContractId.eq(contract_id));
        if !include_deleted {
            query = query.filter(app_serve_app::Column::Status.ne(STATUS_DELETE_SUCCESS));
        }

        query
            .order_by_desc(app_serve_app::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// The app with every task, newest task first.
    pub async fn get(
        &self,
        id: Uuid,
    ) -> Result<(app_serve_app::Model, Vec<app_serve_app_task::Model>), RepositoryError> {
        let app = AppServeApp::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("app serve app", id))?;

        let tasks = AppServeAppTask::find()
            .filter(app_serve_app_task::Column::AppServeAppId.eq(id))
            .order_by_desc(app_serve_app_task::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok((app, tasks))
    }
}

async fn insert_task<C>(conn: &C, app_id: Uuid, task: TaskSpec) -> Result<Uuid, RepositoryError>
where
    C: ConnectionTrait,
{
    let task_id = identifier::new_id();
    let now = identifier::now();

    let record = app_serve_app_task::ActiveModel {
        id: Set(task_id),
        app_serve_app_id: Set(app_id),
        version: Set(task.version),
        strategy: Set(task.strategy),
        status: Set(task.status),
        output: Set(String::new()),
        artifact_url: Set(task.artifact_url),
        image_url: Set(task.image_url),
        executable_path: Set(task.executable_path),
        resource_spec: Set(task.resource_spec),
        profile: Set(task.profile),
        app_config: Set(task.app_config),
        app_secret: Set(task.app_secret),
        extra_env: Set(task.extra_env),
        port: Set(task.port),
        helm_revision: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    AppServeAppTask::insert(record)
        .exec_without_returning(conn)
        .await
        .map_err(RepositoryError::database_error)?;

    Ok(task_id)
}
