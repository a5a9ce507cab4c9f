//! airport-search server binary

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use airport_search::api::{create_router, AppState};
use airport_search::config::{AppConfig, LogFormat};
use airport_search::import::{import_csv, ImportFilter};
use airport_search::storage::{AirportStore, SqliteAirportStore};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the search API (default)
    Serve,
    /// Build the airport database from an OurAirports CSV export
    Import {
        /// Path to airports.csv
        #[arg(long)]
        csv: PathBuf,
        /// Output database; defaults to database.path from the configuration
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Import { csv, database } => {
            run_import(csv, import_target(database, &config)).await
        }
    };

    if let Err(err) = &result {
        tracing::error!("Fatal error: {:#}", err);
    }
    result
}

/// Database written by `import`: the `--database` flag, else `database.path`
fn import_target(database: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    database.unwrap_or_else(|| PathBuf::from(&config.database.path))
}

async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let store = SqliteAirportStore::open(&config.database.path, config.database.max_connections)
        .await
        .with_context(|| format!("failed to open database {}", config.database.path))?;
    let store: Arc<dyn AirportStore> = Arc::new(store);

    let router = create_router(AppState::new(store, &config.static_files.dir));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, router).await?;

    Ok(())
}

async fn run_import(csv: PathBuf, database: PathBuf) -> anyhow::Result<()> {
    let summary = import_csv(&csv, &database, &ImportFilter::default())
        .await
        .with_context(|| format!("failed to import {}", csv.display()))?;

    tracing::info!(
        read = summary.read,
        written = summary.written,
        database = %database.display(),
        "Import complete",
    );
    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("airport_search=info,tower_http=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
