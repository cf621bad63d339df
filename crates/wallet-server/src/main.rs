//! Wallet API server entry point.

use std::{error::Error, net::SocketAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use wallet_config::{app_data_dir, ConfigManager};
use wallet_server::{create_router, AppState};
use wallet_storage_json::JsonWalletStorage;

#[derive(Debug, Parser)]
#[command(name = "wallet_server", version, about = "Serve the wallet API over HTTP")]
struct Args {
    /// Interface to bind, overriding the configured host.
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on, overriding `WALLET_PORT`/`PORT` and the config file.
    #[arg(long, short)]
    port: Option<u16>,
    /// Wallet document to serve.
    #[arg(long)]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wallet_server=info,wallet_storage_json=info,tower_http=info"));
    fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let base = app_data_dir();
    let mut config = ConfigManager::with_base_dir(&base)?.load()?;
    config.apply_env_overrides()?;

    let data_file = args.data.unwrap_or_else(|| config.resolve_data_file(&base));
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let storage = JsonWalletStorage::new(&data_file).with_default_currency(config.currency.clone());
    let app = create_router(AppState::new(Arc::new(storage)));

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, data = %data_file.display(), "wallet API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
