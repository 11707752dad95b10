use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;

use gas_estimate_tracker::api::{self, EstimatesApiState};
use gas_estimate_tracker::cli::Cli;
use gas_estimate_tracker::config::Config;
use gas_estimate_tracker::db;
use gas_estimate_tracker::ingestion::{IngestionService, SnapshotProvider};
use gas_estimate_tracker::logging::init_logging;
use gas_estimate_tracker::metrics::AppMetrics;
use gas_estimate_tracker::query::QueryService;
use gas_estimate_tracker::repository::SqliteEstimateStore;
use gas_estimate_tracker::scheduler::run_ingest_loop;
use gas_estimate_tracker::services::oracle::OracleClient;
use gas_estimate_tracker::store::EstimateStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()
        .map(|config| config.apply_cli(&cli))
        .unwrap_or_else(|err| {
            tracing::error!("Config error: {}", err);
            std::process::exit(1);
        });

    tracing::info!("Service starting with config: {:?}", config);

    let pool = db::create_pool(&config.database_url)
        .await
        .unwrap_or_else(|err| {
            tracing::error!("Database setup failed: {}", err);
            std::process::exit(1);
        });

    let metrics = Arc::new(AppMetrics::new().unwrap_or_else(|err| {
        tracing::error!("Metrics registration failed: {}", err);
        std::process::exit(1);
    }));

    let store: Arc<dyn EstimateStore> = Arc::new(SqliteEstimateStore::new(pool));
    let provider: Arc<dyn SnapshotProvider> =
        Arc::new(OracleClient::new(config.oracle_url.clone()));

    let ingestion = Arc::new(IngestionService::new(
        provider,
        store.clone(),
        metrics.clone(),
    ));
    let query = Arc::new(QueryService::new(store));

    tokio::spawn(run_ingest_loop(
        ingestion.clone(),
        config.poll_interval_seconds,
    ));

    let state = Arc::new(EstimatesApiState {
        ingestion,
        query,
        window_records: config.window_records,
    });
    let app = api::create_app(state, metrics);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|err| {
            tracing::error!("Failed to bind {}: {}", addr, err);
            std::process::exit(1);
        });

    tracing::info!("Listening on {}", addr);
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", err);
        std::process::exit(1);
    }
}
