//! CSP info repository
//!
//! Credential records are append-only apart from auth rotation.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::identifier;
use crate::models::csp_info::{self, CspType, Entity as CspInfo};

/// Repository for CSP credential records
#[derive(Debug, Clone)]
pub struct CspInfoRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl CspInfoRepository {
    /// Creates a new CspInfoRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Registers a CSP account under a contract and returns its new ID.
    ///
    /// # Arguments
    ///
    /// * `contract_id` - Owning contract
    /// * `name` - Display name of the account
    /// * `auth` - Opaque credential blob
    /// * `csp_type` - Cloud provider kind
    pub async fn create(
        &self,
        contract_id: Uuid,
        name: &str,
        auth: &str,
        csp_type: CspType,
    ) -> Result<Uuid, RepositoryError> {
        let id = identifier::new_id();
        let now = identifier::now();

        let record = csp_info::ActiveModel {
            id: Set(id),
            contract_id: Set(contract_id),
            name: Set(name.to_string()),
            auth: Set(auth.to_string()),
            csp_type: Set(csp_type),
            created_at: Set(now),
            updated_at: Set(now),
        };

        CspInfo::insert(record)
            .exec_without_returning(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(csp_id = %id, contract_id = %contract_id, csp_type = ?csp_type, "Created CSP info");
        Ok(id)
    }

    /// Finds a CSP record by ID. Callers that serve it over HTTP drop `auth`.
    ///
    /// # Errors
    ///
    /// `NotFound` when no record has this ID.
    pub async fn get(&self, id: Uuid) -> Result<csp_info::Model, RepositoryError> {
        CspInfo::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("csp info", id))
    }

    /// Returns whether a CSP record with this ID exists.
    pub async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let count = CspInfo::find_by_id(id)
            .count(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(count > 0)
    }

    /// IDs of every CSP registered under the contract, oldest first.
    ///
    /// An empty result is reported as [`RepositoryError::NotFound`].
    pub async fn list_ids_by_contract(&self, contract_id: Uuid) -> Result<Vec<Uuid>, RepositoryError> {
        let ids: Vec<Uuid> = CspInfo::find()
            .select_only()
            .column(csp_info::Column::Id)
            .filter(csp_info::Column::ContractId.eq(contract_id))
            .order_by_asc(csp_info::Column::CreatedAt)
            .into_tuple::<Uuid>()
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if ids.is_empty() {
            return Err(RepositoryError::NotFound(format!(
                "no csp infos for contract {}",
                contract_id
            )));
        }
        Ok(ids)
    }

    /// Replaces the credential blob.
    pub async fn update_auth(&self, id: Uuid, auth: &str) -> Result<(), RepositoryError> {
        let result = CspInfo::update_many()
            .col_expr(csp_info::Column::Auth, Expr::value(auth.to_string()))
            .col_expr(csp_info::Column::UpdatedAt, Expr::value(identifier::now()))
            .filter(csp_info::Column::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("csp info", id));
        }

        tracing::info!(csp_id = %id, "Rotated CSP auth");
        Ok(())
    }

    /// The credential blob alone
    pub async fn get_auth(&self, id: Uuid) -> Result<String, RepositoryError> {
        Ok(self.get(id).await?.auth)
    }
}
