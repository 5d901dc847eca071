//! # Inventory Service Library
//!
//! Registries for CSP accounts, clusters, application groups, AppServe deployments and
//! Keycloak settings, together with the HTTP surface that exposes them.

pub mod config;
pub mod contract;
pub mod db;
pub mod error;
pub mod handlers;
pub mod identifier;
pub mod models;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub use migration;
