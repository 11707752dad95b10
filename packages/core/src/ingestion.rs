//! Ingestion orchestration: fetch → normalize → persist.
//!
//! A cycle either produces all four records or nothing — any fetch or
//! normalization failure aborts before a single write is issued. The
//! writes themselves are fire-and-forget: each record is handed to a
//! detached task and the cycle reports success without waiting for
//! persistence. A failed write is logged and counted, never surfaced;
//! partial visibility of a cycle (say 2 of 4 records) is an accepted
//! consistency weakening since the aggregator averages whatever records
//! each tier has.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::estimates::normalize;
use crate::metrics::AppMetrics;
use crate::services::oracle::{OracleClient, RawSnapshot};
use crate::store::EstimateStore;

/// Snapshot source abstraction so tests can run ingestion without a live
/// oracle.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, AppError>;
}

#[async_trait]
impl SnapshotProvider for OracleClient {
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, AppError> {
        OracleClient::fetch_snapshot(self).await
    }
}

/// Result of a successful ingestion cycle.
#[derive(Debug, Clone, Copy)]
pub struct IngestOutcome {
    pub block_num: u64,
    pub records_submitted: usize,
}

pub struct IngestionService {
    provider: Arc<dyn SnapshotProvider>,
    store: Arc<dyn EstimateStore>,
    metrics: Arc<AppMetrics>,
}

impl IngestionService {
    pub fn new(
        provider: Arc<dyn SnapshotProvider>,
        store: Arc<dyn EstimateStore>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            provider,
            store,
            metrics,
        }
    }

    /// Run one ingestion cycle.
    ///
    /// Success means the snapshot was fetched, normalized, and all four
    /// writes were submitted — not that they were durably persisted.
    pub async fn ingest(&self) -> Result<IngestOutcome, AppError> {
        self.metrics.ingest_cycles_total.inc();

        let result = self.ingest_inner().await;
        if result.is_err() {
            self.metrics.ingest_errors_total.inc();
        }
        result
    }

    async fn ingest_inner(&self) -> Result<IngestOutcome, AppError> {
        let snapshot = self.provider.fetch_snapshot().await?;
        let records = normalize(&snapshot, Utc::now())?;
        let block_num = snapshot.block_num;

        self.metrics.last_block_num.set(block_num as f64);

        let records_submitted = records.len();
        for record in records {
            let store = self.store.clone();
            let metrics = self.metrics.clone();
            let tier = record.tier;
            tokio::spawn(async move {
                if let Err(err) = store.push(record).await {
                    metrics.store_write_errors_total.inc();
                    tracing::warn!("Estimate write failed for {tier}: {err}");
                }
            });
        }

        tracing::debug!(
            "Ingested block {block_num}: {records_submitted} records submitted"
        );

        Ok(IngestOutcome {
            block_num,
            records_submitted,
        })
    }
}
