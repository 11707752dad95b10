//! Estimate store boundary.
//!
//! The pipeline treats persistence as an append-only ordered list with a
//! "last N inserted" query. `EstimateStore` is that boundary; production
//! uses the SQLite-backed [`crate::repository::SqliteEstimateStore`], while
//! tests and the scheduler unit tests use the in-memory ring buffer here.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::estimates::types::EstimateRecord;

/// Default maximum number of records retained by the in-memory store.
pub const DEFAULT_CAPACITY: usize = 10_000;

#[async_trait]
pub trait EstimateStore: Send + Sync {
    /// Append one record. Fails with `StoreWriteFailed`.
    async fn push(&self, record: EstimateRecord) -> Result<(), AppError>;

    /// Return up to `n` most-recently-appended records in insertion order,
    /// oldest first. Fails with `StoreReadFailed`.
    async fn fetch_last_n(&self, n: usize) -> Result<Vec<EstimateRecord>, AppError>;
}

/// Capacity-bounded in-memory store. When full, the oldest record is
/// evicted before the new one is inserted (ring-buffer semantics backed
/// by `VecDeque`).
#[derive(Debug)]
pub struct MemoryEstimateStore {
    data: RwLock<VecDeque<EstimateRecord>>,
    capacity: usize,
}

impl MemoryEstimateStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

impl Default for MemoryEstimateStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl EstimateStore for MemoryEstimateStore {
    async fn push(&self, record: EstimateRecord) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        if data.len() >= self.capacity {
            data.pop_front();
        }
        data.push_back(record);
        Ok(())
    }

    async fn fetch_last_n(&self, n: usize) -> Result<Vec<EstimateRecord>, AppError> {
        let data = self.data.read().await;
        let skip = data.len().saturating_sub(n);
        Ok(data.iter().skip(skip).cloned().collect())
    }
}
