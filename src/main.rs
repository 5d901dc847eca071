//! # Inventory Service Entry Point

use std::sync::Arc;

use clap::{Parser, Subcommand};
use inventory::{
    config::ConfigLoader,
    contract, db,
    migration::{Migrator, MigratorTrait},
    server::{AppState, run_server},
    telemetry,
};

#[derive(Parser)]
#[command(name = "inventory")]
#[command(version)]
#[command(about = "Inventory of CSP accounts, clusters and deployed applications")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and serve the HTTP API (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new().load()?;
    telemetry::init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let db = db::init_pool(&config).await?;
    Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied");

    if let Some(Commands::Migrate) = cli.command {
        return Ok(());
    }

    let contracts = contract::from_config(&config)?;
    let state = AppState::new(Arc::new(config), Arc::new(db), contracts);

    run_server(state).await
}
