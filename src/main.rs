use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use poshbullet::config::ServerConfig;
use poshbullet::server::{AppState, create_router};
use poshbullet::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "poshbullet")]
#[command(about = "Share links with friends", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// TOML file with host, port and database settings
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short, env = "PORT")]
        port: Option<u16>,

        /// SQLite database file
        #[arg(long, env = "DATABASE_PATH")]
        database: Option<PathBuf>,
    },
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Stopping server...");
}

async fn run_serve(config: ServerConfig) -> anyhow::Result<()> {
    if let Some(parent) = config.database.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let store = SqliteStore::new(&config.database)?;
    store.initialize()?;
    info!("Using database at {}", config.database.display());

    let state = Arc::new(AppState::new(Arc::new(store)));
    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("poshbullet=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            database,
        } => {
            let mut server_config = match config {
                Some(path) => ServerConfig::load(&path)?,
                None => ServerConfig::default(),
            };
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }
            if let Some(database) = database {
                server_config.database = database;
            }

            run_serve(server_config).await?;
        }
    }

    Ok(())
}
