//! Unitrack: unicycle custody tracking bot.
//!
//! Main entry point that wires all crates together and starts the bot.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use unitrack_bot::{Bot, Services};
use unitrack_core::config::AppConfig;
use unitrack_core::error::AppError;
use unitrack_database::DatabasePool;
use unitrack_database::repositories::{AdminRoleRepository, UnicycleRepository};
use unitrack_service::{
    AdminRoleService, PendingTransferStore, TransferSweeper, TransferWorkflow, UnicycleService,
};

/// Unicycle custody tracking bot.
#[derive(Debug, Parser)]
#[command(name = "unitrack", version, about)]
struct Cli {
    /// Directory holding default.toml and the per-environment overlays.
    #[arg(long, default_value = "config")]
    config_dir: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect to Discord and serve commands (default).
    Run,
    /// Apply database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config_dir) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(config).await,
        Command::Migrate => migrate(config).await,
    };

    if let Err(e) = result {
        tracing::error!(error = ?e, "Unitrack exited with an error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration(dir: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("UNITRACK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect to the database and bring the schema up to date.
async fn connect_database(config: &AppConfig) -> Result<DatabasePool, AppError> {
    tracing::info!(url = %config.database.url, "Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;
    if !db.health_check().await? {
        return Err(AppError::database("Database health check failed"));
    }

    tracing::info!("Running database migrations...");
    unitrack_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    Ok(db)
}

/// `unitrack migrate`
async fn migrate(config: AppConfig) -> Result<(), AppError> {
    let db = connect_database(&config).await?;
    db.close().await;
    Ok(())
}

/// `unitrack run`
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Unitrack v{}", env!("CARGO_PKG_VERSION"));
    config.validate()?;

    // ── Step 1: Database connection + migrations ─────────────────
    let db = connect_database(&config).await?;

    // ── Step 2: Initialize repositories ──────────────────────────
    let unicycle_repo = Arc::new(UnicycleRepository::new(db.pool().clone()));
    let admin_role_repo = Arc::new(AdminRoleRepository::new(db.pool().clone()));

    // ── Step 3: Pending transfer store ───────────────────────────
    let pending = Arc::new(PendingTransferStore::new(
        config.transfer.confirmation_timeout(),
    ));

    // ── Step 4: Initialize services ──────────────────────────────
    let services = Services {
        unicycles: UnicycleService::new(Arc::clone(&unicycle_repo), Arc::clone(&pending)),
        admin_roles: AdminRoleService::new(Arc::clone(&admin_role_repo)),
        transfers: TransferWorkflow::new(Arc::clone(&unicycle_repo), Arc::clone(&pending)),
        admin_role_repo,
    };

    // ── Step 5: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 6: Start transfer sweeper ───────────────────────────
    let sweeper = TransferSweeper::new(Arc::clone(&pending), config.transfer.sweep_interval());
    let sweeper_handle = tokio::spawn(sweeper.run(shutdown_rx));

    // ── Step 7: Connect to Discord ───────────────────────────────
    let bot = Bot::new(config.discord.clone(), services);
    let result = bot
        .run(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await;

    // ── Step 8: Stop background tasks ────────────────────────────
    if shutdown_tx.send(true).is_err() {
        tracing::warn!("Transfer sweeper already stopped before shutdown");
    }
    tracing::info!("Waiting for background tasks to complete...");
    match tokio::time::timeout(Duration::from_secs(10), sweeper_handle).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "Transfer sweeper task failed"),
        Err(_) => tracing::warn!("Transfer sweeper did not stop within 10s"),
    }
    db.close().await;

    result?;
    tracing::info!("Unitrack shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
