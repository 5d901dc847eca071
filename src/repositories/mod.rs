//! # Repository Layer
//!
//! Repositories encapsulate the SeaORM operations for each inventory table. They are built
//! once at startup into a [`Registries`] bundle shared through the HTTP state.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod app_group;
pub mod app_serve_app;
pub mod application;
pub mod cluster;
pub mod csp_info;
pub mod keycloak_info;

pub use app_group::{AppGroupRepository, NewAppGroup};
pub use app_serve_app::{AppServeAppRepository, NewAppServeApp};
pub use application::ApplicationRepository;
pub use cluster::ClusterRepository;
pub use csp_info::CspInfoRepository;
pub use keycloak_info::{KeycloakInfoRepository, NewKeycloakInfo};

/// Every registry, sharing one connection pool.
#[derive(Debug, Clone)]
pub struct Registries {
    pub csp_infos: CspInfoRepository,
    pub clusters: ClusterRepository,
    pub app_groups: AppGroupRepository,
    pub applications: ApplicationRepository,
    pub app_serve_apps: AppServeAppRepository,
    pub keycloak_infos: KeycloakInfoRepository,
}

impl Registries {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            csp_infos: CspInfoRepository::new(db.clone()),
            clusters: ClusterRepository::new(db.clone()),
            app_groups: AppGroupRepository::new(db.clone()),
            applications: ApplicationRepository::new(db.clone()),
            app_serve_apps: AppServeAppRepository::new(db.clone()),
            keycloak_infos: KeycloakInfoRepository::new(db),
        }
    }
}
