mod error;
mod loader;
mod routes;
mod state;

use axum::routing::{get, post};
use axum::Router;
use jomun_core::Config;
use state::{AppState, SharedState, Snapshot, Sources};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let port: u16 = std::env::args()
        .position(|a| a == "--port")
        .and_then(|i| std::env::args().nth(i + 1))
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let bind: String = std::env::args()
        .position(|a| a == "--bind")
        .and_then(|i| std::env::args().nth(i + 1))
        .unwrap_or_else(|| "127.0.0.1".to_string());

    let sources = Sources {
        tsv_path: std::env::var("JOMUN_TSV_PATH").ok().map(PathBuf::from),
        xml_dir: std::env::var("JOMUN_XML_DIR").ok().map(PathBuf::from),
    };

    let config = match std::env::var("JOMUN_CONFIG") {
        Ok(path) => Config::load(std::path::Path::new(&path)).unwrap_or_else(|err| {
            tracing::error!(%err, "config load failed, using defaults");
            Config::default()
        }),
        Err(_) => Config::default(),
    };

    // Start with whatever the sources give; a failed initial load serves
    // an empty snapshot until /reload succeeds.
    let initial = loader::load_snapshot(&sources, &config).unwrap_or_else(|err| {
        tracing::error!(%err, "initial load failed, starting empty");
        Snapshot::empty(0)
    });
    tracing::info!(
        records = initial.records.len(),
        documents = initial.documents.len(),
        "snapshot loaded"
    );

    let state: SharedState = Arc::new(AppState::new(sources, config, initial));

    let app = Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/search", get(routes::search))
        .route("/answer", get(routes::answer))
        .route("/scan", get(routes::scan))
        .route("/reload", post(routes::reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", bind, port);
    tracing::info!("jomun-service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
