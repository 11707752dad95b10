//! Shared test doubles. Compiled only for tests.

use async_trait::async_trait;

use crate::error::AppError;
use crate::estimates::types::EstimateRecord;
use crate::ingestion::SnapshotProvider;
use crate::services::oracle::RawSnapshot;
use crate::store::EstimateStore;

enum MockResponse {
    Snapshot(RawSnapshot),
    Unavailable(String),
}

/// A `SnapshotProvider` that returns a canned snapshot or error.
pub struct MockProvider {
    response: MockResponse,
}

impl MockProvider {
    pub fn with_snapshot(snapshot: RawSnapshot) -> Self {
        Self {
            response: MockResponse::Snapshot(snapshot),
        }
    }

    pub fn unavailable(message: &str) -> Self {
        Self {
            response: MockResponse::Unavailable(message.to_string()),
        }
    }
}

#[async_trait]
impl SnapshotProvider for MockProvider {
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, AppError> {
        match &self.response {
            MockResponse::Snapshot(snapshot) => Ok(snapshot.clone()),
            MockResponse::Unavailable(msg) => Err(AppError::UpstreamUnavailable(msg.clone())),
        }
    }
}

/// An `EstimateStore` whose writes always fail.
pub struct FailingStore;

#[async_trait]
impl EstimateStore for FailingStore {
    async fn push(&self, record: EstimateRecord) -> Result<(), AppError> {
        Err(AppError::StoreWriteFailed(format!(
            "disk full while writing {} record",
            record.tier
        )))
    }

    async fn fetch_last_n(&self, _n: usize) -> Result<Vec<EstimateRecord>, AppError> {
        Ok(Vec::new())
    }
}

/// A realistic oracle snapshot: block 100, Fastest cost 40/10 = 4 gwei.
pub fn snapshot() -> RawSnapshot {
    RawSnapshot {
        fastest: 40.0,
        fast: 20.0,
        average: 10.0,
        safe_low: 5.0,
        fastest_wait: 0.5,
        fast_wait: 0.7,
        avg_wait: 1.5,
        safe_low_wait: 10.0,
        block_num: 100,
        average_calc: Some(10.0),
        safelow_calc: Some(5.0),
    }
}
