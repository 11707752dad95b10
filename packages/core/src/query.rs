//! Query orchestration over the estimate store.
//!
//! Both queries read the same bounded window — the last `limit` records in
//! insertion order — and either pass it through raw or fold it into
//! per-tier averages. Read failures are always surfaced; there is no
//! fallback data for a failed read.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::AppError;
use crate::estimates::{aggregate, AveragedEstimate, EstimateRecord, Tier};
use crate::store::EstimateStore;

/// Default query window: one hour of history at one 4-record ingestion
/// cycle per minute.
pub const DEFAULT_WINDOW_RECORDS: usize = 240;

pub struct QueryService {
    store: Arc<dyn EstimateStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn EstimateStore>) -> Self {
        Self { store }
    }

    /// The raw window, oldest first.
    pub async fn recent_raw(&self, limit: usize) -> Result<Vec<EstimateRecord>, AppError> {
        self.store.fetch_last_n(limit).await
    }

    /// The window folded into per-tier averages. An empty window yields an
    /// empty map, not an error.
    pub async fn recent_averages(
        &self,
        limit: usize,
    ) -> Result<BTreeMap<Tier, AveragedEstimate>, AppError> {
        let records = self.store.fetch_last_n(limit).await?;
        Ok(aggregate(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::store::MemoryEstimateStore;

    fn record(tier: Tier, cost: f64, wait: f64) -> EstimateRecord {
        EstimateRecord {
            tier,
            cost_per_gwei: cost,
            wait_time_in_min: wait,
            block_num: 100,
            created_at: Utc::now(),
        }
    }

    async fn seeded_service(records: Vec<EstimateRecord>) -> QueryService {
        let store = Arc::new(MemoryEstimateStore::default());
        for r in records {
            store.push(r).await.unwrap();
        }
        QueryService::new(store)
    }

    #[tokio::test]
    async fn recent_raw_returns_window_in_insertion_order() {
        let service = seeded_service(vec![
            record(Tier::Fastest, 1.0, 0.5),
            record(Tier::Fast, 2.0, 1.0),
            record(Tier::Standard, 3.0, 2.0),
        ])
        .await;

        let raw = service.recent_raw(2).await.unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].tier, Tier::Fast);
        assert_eq!(raw[1].tier, Tier::Standard);
    }

    #[tokio::test]
    async fn recent_averages_folds_the_window() {
        let mut records = Vec::new();
        for cost in [4.0, 6.0] {
            records.push(record(Tier::Fastest, cost, 0.5));
            records.push(record(Tier::Fast, 2.0, 1.0));
            records.push(record(Tier::Standard, 1.0, 2.0));
            records.push(record(Tier::Safelow, 0.5, 10.0));
        }
        let service = seeded_service(records).await;

        let averages = service.recent_averages(8).await.unwrap();
        assert_eq!(averages[&Tier::Fastest].avg_cost_per_gwei, "5");
        assert_eq!(averages[&Tier::Fastest].num_records, 2);
    }

    #[tokio::test]
    async fn recent_averages_of_empty_store_is_empty_map() {
        let service = seeded_service(Vec::new()).await;
        assert!(service.recent_averages(240).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_averages_limit_bounds_the_window() {
        let service = seeded_service(vec![
            record(Tier::Fastest, 100.0, 0.5), // outside the window
            record(Tier::Fastest, 4.0, 0.5),
            record(Tier::Fastest, 6.0, 0.5),
        ])
        .await;

        let averages = service.recent_averages(2).await.unwrap();
        assert_eq!(averages[&Tier::Fastest].avg_cost_per_gwei, "5");
    }
}
