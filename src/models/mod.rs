//! # Data Models
//!
//! SeaORM entities for the inventory tables plus the response shapes served over HTTP.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod app_group;
pub mod app_serve_app;
pub mod app_serve_app_task;
pub mod application;
pub mod cluster;
pub mod csp_info;
pub mod keycloak_info;

pub use app_group::Entity as AppGroup;
pub use app_serve_app::Entity as AppServeApp;
pub use app_serve_app_task::Entity as AppServeAppTask;
pub use application::Entity as Application;
pub use cluster::Entity as Cluster;
pub use csp_info::Entity as CspInfo;
pub use keycloak_info::Entity as KeycloakInfo;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "inventory".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enum_wire_names_are_screaming_case() {
        assert_eq!(
            serde_json::to_value(application::AppType::KubernetesDashboard).unwrap(),
            json!("KUBERNETES_DASHBOARD")
        );
        assert_eq!(
            serde_json::to_value(app_group::AppGroupType::ServiceMesh).unwrap(),
            json!("SERVICE_MESH")
        );
        assert_eq!(
            serde_json::from_value::<csp_info::CspType>(json!("OPENSTACK")).unwrap(),
            csp_info::CspType::Openstack
        );
    }

    #[test]
    fn unspecified_is_the_default_status() {
        assert_eq!(
            cluster::ClusterStatus::default(),
            cluster::ClusterStatus::Unspecified
        );
        assert_eq!(
            app_group::AppGroupStatus::default(),
            app_group::AppGroupStatus::Unspecified
        );
    }

    #[test]
    fn service_info_names_inventory() {
        assert_eq!(ServiceInfo::default().service, "inventory");
    }
}
