use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use departures_server::gtfs::DatasetStore;
use departures_server::query::{NearbyQuery, QueryConfig};
use departures_server::telegram::{TelegramClient, TelegramConfig, run_bot};
use departures_server::web::{AppState, create_router};

const DEFAULT_GTFS_PATH: &str = "gtfs.zip";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let gtfs_path = std::env::var("GTFS_PATH").unwrap_or_else(|_| DEFAULT_GTFS_PATH.to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let token = std::env::var("TELEGRAM_TOKEN")
        .or_else(|_| std::env::var("TOKEN"))
        .ok()
        .filter(|t| !t.is_empty());

    let addr: SocketAddr = match bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(%bind_addr, error = %e, "Invalid BIND_ADDR");
            std::process::exit(1);
        }
    };

    // Load the dataset before serving anything
    let store = match tokio::task::spawn_blocking(move || DatasetStore::load(&gtfs_path)).await {
        Ok(Ok(store)) => store,
        Ok(Err(e)) => {
            error!(error = %e, "Failed to load GTFS dataset");
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "Dataset loader panicked");
            std::process::exit(1);
        }
    };

    let query = NearbyQuery::new(Arc::new(store), QueryConfig::default());

    // Telegram bot runs alongside the web server
    match token {
        Some(token) => match TelegramClient::new(TelegramConfig::new(token)) {
            Ok(client) => {
                tokio::spawn(run_bot(client, query.clone()));
            }
            Err(e) => error!(error = %e, "Failed to create Telegram client, bot disabled"),
        },
        None => warn!("TELEGRAM_TOKEN not set, Telegram bot disabled"),
    }

    let app = create_router(AppState::new(query));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!("Nearby departures listening on http://{addr}");
    info!("  GET /health                  - Health check");
    info!("  GET /nearby?lat=..&lon=..    - Departures near a point");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
