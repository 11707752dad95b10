//! Periodic ingestion scheduler.
//!
//! Drives the main polling loop: each tick runs one ingestion cycle so
//! the store keeps filling without an external cron POSTing the ingest
//! endpoint. Errors from a cycle are logged and the loop continues — a
//! single failed poll should never take down the scheduler.
//!
//! Runs until `Ctrl+C` (SIGINT) is received.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time;

use crate::ingestion::IngestionService;

/// Run the ingestion polling loop.
pub async fn run_ingest_loop(ingestion: Arc<IngestionService>, poll_interval_seconds: u64) {
    let mut interval = time::interval(Duration::from_secs(poll_interval_seconds));

    tracing::info!("Ingestion polling started (interval: {}s)", poll_interval_seconds);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                ingest_once(&ingestion).await;
            }

            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown signal received. Stopping polling.");
                break;
            }
        }
    }

    tracing::info!("Ingestion polling stopped cleanly");
}

/// Execute a single poll cycle. Extracted for testability.
async fn ingest_once(ingestion: &Arc<IngestionService>) {
    match ingestion.ingest().await {
        Ok(outcome) => {
            tracing::info!(
                "Ingested block {} ({} records submitted)",
                outcome.block_num,
                outcome.records_submitted,
            );
        }
        Err(err) => {
            tracing::error!("Ingestion error — skipping tick: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::ingestion::SnapshotProvider;
    use crate::metrics::AppMetrics;
    use crate::store::{EstimateStore, MemoryEstimateStore};
    use crate::testutil::{snapshot, MockProvider};

    fn make_ingestion(provider: MockProvider) -> (Arc<IngestionService>, Arc<MemoryEstimateStore>) {
        let store = Arc::new(MemoryEstimateStore::default());
        let provider: Arc<dyn SnapshotProvider> = Arc::new(provider);
        let metrics = Arc::new(AppMetrics::new().unwrap());
        let ingestion = Arc::new(IngestionService::new(provider, store.clone(), metrics));
        (ingestion, store)
    }

    async fn wait_for_records(store: &MemoryEstimateStore, expected: usize) {
        for _ in 0..100 {
            if store.len().await >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("store never reached {expected} records");
    }

    #[tokio::test]
    async fn ingest_once_pushes_records_into_store() {
        let (ingestion, store) = make_ingestion(MockProvider::with_snapshot(snapshot()));

        ingest_once(&ingestion).await;

        wait_for_records(&store, 4).await;
    }

    #[tokio::test]
    async fn ingest_once_on_provider_error_leaves_store_empty() {
        let (ingestion, store) = make_ingestion(MockProvider::unavailable("oracle down"));

        ingest_once(&ingestion).await;

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn two_poll_cycles_accumulate_data_in_store() {
        let (ingestion, store) = make_ingestion(MockProvider::with_snapshot(snapshot()));

        ingest_once(&ingestion).await;
        ingest_once(&ingestion).await;

        wait_for_records(&store, 8).await;
        assert_eq!(store.fetch_last_n(100).await.unwrap().len(), 8);
    }
}
