//! Contract service client
//!
//! Cluster listings without a filter fall back to the caller's default contract, which is
//! owned by the external contract service.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::RepositoryError;

/// Resolves contract context owned by another service.
#[async_trait]
pub trait ContractService: Send + Sync {
    /// ID of the default contract.
    async fn default_contract(&self) -> Result<Uuid, RepositoryError>;
}

#[derive(Debug, Deserialize)]
struct DefaultContractResponse {
    #[serde(default)]
    contract: Option<ContractSummary>,
}

#[derive(Debug, Deserialize)]
struct ContractSummary {
    contract_id: Uuid,
}

/// HTTP client for the contract service.
#[derive(Debug, Clone)]
pub struct HttpContractClient {
    http_client: Client,
    base_url: Url,
}

impl HttpContractClient {
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn endpoint(&self) -> Result<Url, RepositoryError> {
        self.base_url.join("contracts/default").map_err(|err| {
            RepositoryError::Unavailable(format!("invalid contract service URL: {}", err))
        })
    }
}

#[async_trait]
impl ContractService for HttpContractClient {
    async fn default_contract(&self) -> Result<Uuid, RepositoryError> {
        let url = self.endpoint()?;

        let response = self.http_client.get(url).send().await.map_err(|err| {
            tracing::warn!(error = %err, "Contract service request failed");
            RepositoryError::Unavailable(format!("contract service unreachable: {}", err))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound(
                "default contract not found".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(RepositoryError::Unavailable(format!(
                "contract service returned status {}",
                status
            )));
        }

        let body: DefaultContractResponse = response.json().await.map_err(|err| {
            RepositoryError::Unavailable(format!("malformed contract service response: {}", err))
        })?;

        let contract = body.contract.ok_or_else(|| {
            RepositoryError::NotFound("default contract not found".to_string())
        })?;

        tracing::debug!(contract_id = %contract.contract_id, "Resolved default contract");
        Ok(contract.contract_id)
    }
}

/// Fixed default contract used when no contract service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticContractService(pub Option<Uuid>);

#[async_trait]
impl ContractService for StaticContractService {
    async fn default_contract(&self) -> Result<Uuid, RepositoryError> {
        self.0.ok_or_else(|| {
            RepositoryError::Unavailable("no default contract configured".to_string())
        })
    }
}

/// Builds the contract service described by the configuration.
pub fn from_config(config: &AppConfig) -> anyhow::Result<Arc<dyn ContractService>> {
    match config.contract_service_url()? {
        Some(url) => {
            let timeout = Duration::from_millis(config.contract_service_timeout_ms);
            tracing::info!(%url, "Using contract service");
            Ok(Arc::new(HttpContractClient::new(url, timeout)?))
        }
        None => {
            let fallback = config.default_contract_id()?;
            tracing::info!(default_contract_id = ?fallback, "No contract service configured");
            Ok(Arc::new(StaticContractService(fallback)))
        }
    }
}
