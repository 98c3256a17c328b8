use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trip_router::cache::CacheConfig;
use trip_router::loader::{ENV_STOP_DIRECTORY_PATH, LoadError, NetworkSource, load_network};
use trip_router::planner::{ConfigError, Router, RouterConfig};
use trip_router::web::{AppState, create_router};

/// Address to listen on when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid BIND_ADDR {addr:?}: {source}")]
    Addr {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let router_config = RouterConfig::from_env()?;
    info!(?router_config, "Router configuration");

    let source = NetworkSource::from_env()?;
    let directory = std::env::var(ENV_STOP_DIRECTORY_PATH)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let network = load_network(&source, directory.as_deref()).await?;

    let state = AppState::new(Router::new(router_config), network, &CacheConfig::default());
    let app = create_router(state);

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = bind
        .parse()
        .map_err(|source| StartupError::Addr { addr: bind.clone(), source })?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Trip router listening");
    info!("  GET  /health - Health check");
    info!("  GET  /lines  - List lines");
    info!("  POST /route  - Plan a trip");

    axum::serve(listener, app).await?;
    Ok(())
}
