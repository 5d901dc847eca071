//! Cluster repository
//!
//! Clusters hang off a CSP record and move through a status lifecycle reported by the
//! workflow engine. Transitions are overwritten as given.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::csp_info::CspInfoRepository;
use crate::error::RepositoryError;
use crate::identifier;
use crate::models::cluster::{self, ClusterConf, ClusterStatus, Entity as Cluster};

/// Repository for cluster records
#[derive(Debug, Clone)]
pub struct ClusterRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
    /// Used to verify the owning CSP before insert
    pub csp_infos: CspInfoRepository,
}

impl ClusterRepository {
    /// Creates a new ClusterRepository sharing the pool with its CSP lookup
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let csp_infos = CspInfoRepository::new(db.clone());
        Self { db, csp_infos }
    }

    /// Creates a cluster in status `UNSPECIFIED` under an existing CSP.
    ///
    /// # Arguments
    ///
    /// * `contract_id` - Owning contract
    /// * `csp_id` - CSP account the cluster is provisioned through
    /// * `name` - Display name
    /// * `conf` - Sizing and placement, stored as given
    ///
    /// # Errors
    ///
    /// `NotFound` when the CSP does not exist. Nothing is written in that case.
    pub async fn create(
        &self,
        contract_id: Uuid,
        csp_id: Uuid,
        name: &str,
        conf: &ClusterConf,
    ) -> Result<Uuid, RepositoryError> {
        if !self.csp_infos.exists(csp_id).await? {
            return Err(RepositoryError::not_found("csp info", csp_id));
        }

        let id = identifier::new_id();
        let now = identifier::now();

        let record = cluster::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            contract_id: Set(contract_id),
            csp_id: Set(csp_id),
            status: Set(ClusterStatus::Unspecified),
            status_desc: Set(String::new()),
            workflow_id: Set(String::new()),
            ssh_key_name: Set(conf.ssh_key_name.clone()),
            region: Set(conf.region.clone()),
            num_of_az: Set(conf.num_of_az),
            machine_type: Set(conf.machine_type.clone()),
            min_size_per_az: Set(conf.min_size_per_az),
            max_size_per_az: Set(conf.max_size_per_az),
            kubeconfig: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Cluster::insert(record)
            .exec_without_returning(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            cluster_id = %id,
            contract_id = %contract_id,
            csp_id = %csp_id,
            region = %conf.region,
            "Created cluster"
        );
        Ok(id)
    }

    /// Finds a cluster by ID
    ///
    /// # Errors
    ///
    /// `NotFound` when no cluster has this ID.
    pub async fn get(&self, id: Uuid) -> Result<cluster::Model, RepositoryError> {
        Cluster::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("cluster", id))
    }

    /// Clusters of a contract, oldest first. May be empty.
    pub async fn list_by_contract(
        &self,
        contract_id: Uuid,
    ) -> Result<Vec<cluster::Model>, RepositoryError> {
        Cluster::find()
            .filter(cluster::Column::ContractId.eq(contract_id))
            .order_by_asc(cluster::Column::CreatedAt)
            .order_by_asc(cluster::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Clusters provisioned through a CSP. An empty result is `NotFound`.
    pub async fn list_by_csp(&self, csp_id: Uuid) -> Result<Vec<cluster::Model>, RepositoryError> {
        let clusters = Cluster::find()
            .filter(cluster::Column::CspId.eq(csp_id))
            .order_by_asc(cluster::Column::CreatedAt)
            .order_by_asc(cluster::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if clusters.is_empty() {
            return Err(RepositoryError::NotFound(format!(
                "no clusters for csp {}",
                csp_id
            )));
        }
        Ok(clusters)
    }

    /// Overwrites status, description and workflow ID. Transitions are not validated.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row was updated.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ClusterStatus,
        status_desc: &str,
        workflow_id: &str,
    ) -> Result<(), RepositoryError> {
        let result = Cluster::update_many()
            .col_expr(cluster::Column::Status, Expr::value(status.to_value()))
            .col_expr(cluster::Column::StatusDesc, Expr::value(status_desc.to_string()))
            .col_expr(cluster::Column::WorkflowId, Expr::value(workflow_id.to_string()))
            .col_expr(cluster::Column::UpdatedAt, Expr::value(identifier::now()))
            .filter(cluster::Column::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("cluster", id));
        }

        tracing::info!(cluster_id = %id, status = ?status, workflow_id, "Updated cluster status");
        Ok(())
    }

    /// Stores the kubeconfig produced once provisioning finishes.
    pub async fn update_kubeconfig(&self, id: Uuid, kubeconfig: &str) -> Result<(), RepositoryError> {
        let result = Cluster::update_many()
            .col_expr(cluster::Column::Kubeconfig, Expr::value(kubeconfig.to_string()))
            .col_expr(cluster::Column::UpdatedAt, Expr::value(identifier::now()))
            .filter(cluster::Column::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("cluster", id));
        }

        tracing::debug!(cluster_id = %id, "Stored cluster kubeconfig");
        Ok(())
    }
}
