//! # Server Configuration
//!
//! Router assembly, shared state and the OpenAPI document for the inventory API.

use anyhow::Context;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::contract::ContractService;
use crate::handlers::{self, app_groups, app_serve_apps, applications, clusters, csp_infos, keycloak_infos};
use crate::repositories::Registries;
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Arc<DatabaseConnection>,
    pub registries: Registries,
    pub contracts: Arc<dyn ContractService>,
}

impl AppState {
    /// Builds the registries on top of the shared pool.
    pub fn new(
        config: Arc<AppConfig>,
        db: Arc<DatabaseConnection>,
        contracts: Arc<dyn ContractService>,
    ) -> Self {
        let registries = Registries::new(db.clone());
        Self {
            config,
            db,
            registries,
            contracts,
        }
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/csp-infos", post(csp_infos::create_csp_info))
        .route("/csp-infos/{id}", get(csp_infos::get_csp_info))
        .route(
            "/csp-infos/{id}/auth",
            get(csp_infos::get_csp_auth).put(csp_infos::update_csp_auth),
        )
        .route(
            "/contracts/{contract_id}/csp-ids",
            get(csp_infos::list_csp_ids_by_contract),
        )
        .route(
            "/clusters",
            post(clusters::create_cluster).get(clusters::list_clusters),
        )
        .route("/clusters/{id}", get(clusters::get_cluster))
        .route("/clusters/{id}/status", put(clusters::update_cluster_status))
        .route(
            "/clusters/{id}/kubeconfig",
            put(clusters::update_cluster_kubeconfig),
        )
        .route(
            "/clusters/{id}/app-groups",
            post(app_groups::create_app_group).get(app_groups::list_cluster_app_groups),
        )
        .route(
            "/clusters/{id}/keycloak-infos",
            post(keycloak_infos::create_keycloak_info).get(keycloak_infos::list_keycloak_infos),
        )
        .route("/app-groups", get(app_groups::find_app_groups))
        .route(
            "/app-groups/{id}",
            get(app_groups::get_app_group).delete(app_groups::delete_app_group),
        )
        .route(
            "/app-groups/{id}/status",
            put(app_groups::update_app_group_status),
        )
        .route(
            "/app-groups/{id}/applications",
            get(applications::list_applications),
        )
        .route(
            "/app-groups/{id}/applications/{type}",
            put(applications::upsert_application),
        )
        .route(
            "/app-serve-apps",
            post(app_serve_apps::create_app_serve_app).get(app_serve_apps::list_app_serve_apps),
        )
        .route("/app-serve-apps/{id}", get(app_serve_apps::get_app_serve_app))
        .route(
            "/app-serve-apps/{id}/tasks",
            post(app_serve_apps::append_app_serve_task),
        )
        .route(
            "/app-serve-apps/{id}/endpoint",
            put(app_serve_apps::update_app_serve_endpoint),
        )
        .route(
            "/app-serve-app-tasks/{task_id}/status",
            put(app_serve_apps::update_app_serve_task_status),
        )
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(telemetry::trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn run_server(state: AppState) -> anyhow::Result<()> {
    let addr = state
        .config
        .bind_addr()
        .context("Invalid server address")?;
    let profile = state.config.profile.clone();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::csp_infos::create_csp_info,
        crate::handlers::csp_infos::get_csp_info,
        crate::handlers::csp_infos::get_csp_auth,
        crate::handlers::csp_infos::update_csp_auth,
        crate::handlers::csp_infos::list_csp_ids_by_contract,
        crate::handlers::clusters::create_cluster,
        crate::handlers::clusters::get_cluster,
        crate::handlers::clusters::list_clusters,
        crate::handlers::clusters::update_cluster_status,
        crate::handlers::clusters::update_cluster_kubeconfig,
        crate::handlers::app_groups::create_app_group,
        crate::handlers::app_groups::list_cluster_app_groups,
        crate::handlers::app_groups::find_app_groups,
        crate::handlers::app_groups::get_app_group,
        crate::handlers::app_groups::update_app_group_status,
        crate::handlers::app_groups::delete_app_group,
        crate::handlers::applications::list_applications,
        crate::handlers::applications::upsert_application,
        crate::handlers::app_serve_apps::create_app_serve_app,
        crate::handlers::app_serve_apps::list_app_serve_apps,
        crate::handlers::app_serve_apps::get_app_serve_app,
        crate::handlers::app_serve_apps::append_app_serve_task,
        crate::handlers::app_serve_apps::update_app_serve_task_status,
        crate::handlers::app_serve_apps::update_app_serve_endpoint,
        crate::handlers::keycloak_infos::create_keycloak_info,
        crate::handlers::keycloak_infos::list_keycloak_infos,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::handlers::types::IdResponse,
            crate::handlers::types::IdListResponse,
            crate::handlers::types::AppServeAppIdsResponse,
            crate::handlers::types::HealthResponse,
            crate::models::csp_info::CspType,
            crate::models::csp_info::CspInfoResponse,
            crate::models::cluster::ClusterStatus,
            crate::models::cluster::ClusterConf,
            crate::models::cluster::ClusterResponse,
            crate::models::app_group::AppGroupType,
            crate::models::app_group::AppGroupStatus,
            crate::models::app_group::AppGroupResponse,
            crate::models::application::AppType,
            crate::models::application::ApplicationResponse,
            crate::models::app_serve_app::AppServeAppResponse,
            crate::models::app_serve_app::AppServeAppWithTasks,
            crate::models::app_serve_app_task::TaskSpec,
            crate::models::app_serve_app_task::AppServeAppTaskResponse,
            crate::models::keycloak_info::KeycloakInfoResponse,
            crate::handlers::csp_infos::CreateCspInfoRequest,
            crate::handlers::csp_infos::CspAuthBody,
            crate::handlers::clusters::CreateClusterRequest,
            crate::handlers::clusters::UpdateClusterStatusRequest,
            crate::handlers::clusters::UpdateKubeconfigRequest,
            crate::handlers::app_groups::CreateAppGroupRequest,
            crate::handlers::app_groups::UpdateAppGroupStatusRequest,
            crate::handlers::applications::UpsertApplicationRequest,
            crate::handlers::app_serve_apps::CreateAppServeAppRequest,
            crate::handlers::app_serve_apps::UpdateTaskStatusRequest,
            crate::handlers::app_serve_apps::UpdateEndpointRequest,
            crate::handlers::keycloak_infos::CreateKeycloakInfoRequest,
        )
    ),
    tags(
        (name = "root", description = "Service information and health"),
        (name = "csp-infos", description = "Cloud provider accounts"),
        (name = "clusters", description = "Cluster records and status"),
        (name = "app-groups", description = "Application groups"),
        (name = "applications", description = "Applications inside a group"),
        (name = "app-serve-apps", description = "AppServe deployments and tasks"),
        (name = "keycloak-infos", description = "Per-cluster identity broker settings"),
    ),
    info(
        title = "Inventory API",
        description = "Inventory of CSP accounts, clusters and deployed applications",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
