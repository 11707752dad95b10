//! SQLite-backed estimate store.
//!
//! Records are appended with an autoincrement id, which doubles as the
//! insertion order the "last N" query is defined over. Timestamps are
//! stored as RFC 3339 strings. The table is pruned back to `max_rows`
//! after each insert; at four rows per ingestion cycle that keeps the
//! database bounded without a separate maintenance task.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::error::AppError;
use crate::estimates::types::{EstimateRecord, Tier};
use crate::store::EstimateStore;

/// Default row-count bound for the estimates table.
pub const DEFAULT_MAX_ROWS: u32 = 100_000;

pub struct SqliteEstimateStore {
    pool: SqlitePool,
    max_rows: u32,
}

impl SqliteEstimateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_max_rows(pool, DEFAULT_MAX_ROWS)
    }

    pub fn with_max_rows(pool: SqlitePool, max_rows: u32) -> Self {
        Self { pool, max_rows }
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<EstimateRecord, AppError> {
        let tier: String = row
            .try_get("tier")
            .map_err(|err| AppError::StoreReadFailed(err.to_string()))?;
        let tier: Tier = tier.parse().map_err(AppError::StoreReadFailed)?;

        let cost_per_gwei: f64 = row
            .try_get("cost_per_gwei")
            .map_err(|err| AppError::StoreReadFailed(err.to_string()))?;
        let wait_time_in_min: f64 = row
            .try_get("wait_time_in_min")
            .map_err(|err| AppError::StoreReadFailed(err.to_string()))?;
        let block_num: i64 = row
            .try_get("block_num")
            .map_err(|err| AppError::StoreReadFailed(err.to_string()))?;
        let created_at: String = row
            .try_get("created_at")
            .map_err(|err| AppError::StoreReadFailed(err.to_string()))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|err| AppError::StoreReadFailed(format!("bad created_at: {err}")))?
            .with_timezone(&Utc);

        Ok(EstimateRecord {
            tier,
            cost_per_gwei,
            wait_time_in_min,
            block_num: block_num as u64,
            created_at,
        })
    }
}

#[async_trait]
impl EstimateStore for SqliteEstimateStore {
    async fn push(&self, record: EstimateRecord) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO gas_estimates
             (tier, cost_per_gwei, wait_time_in_min, block_num, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.tier.as_str())
        .bind(record.cost_per_gwei)
        .bind(record.wait_time_in_min)
        .bind(record.block_num as i64)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| AppError::StoreWriteFailed(err.to_string()))?;

        sqlx::query(
            "DELETE FROM gas_estimates
             WHERE id NOT IN (SELECT id FROM gas_estimates ORDER BY id DESC LIMIT ?)",
        )
        .bind(self.max_rows as i64)
        .execute(&self.pool)
        .await
        .map_err(|err| AppError::StoreWriteFailed(err.to_string()))?;

        Ok(())
    }

    async fn fetch_last_n(&self, n: usize) -> Result<Vec<EstimateRecord>, AppError> {
        let rows = sqlx::query(
            "SELECT tier, cost_per_gwei, wait_time_in_min, block_num, created_at
             FROM gas_estimates
             ORDER BY id DESC
             LIMIT ?",
        )
        .bind(n as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| AppError::StoreReadFailed(err.to_string()))?;

        // Reverse so callers see insertion order, oldest first.
        rows.iter()
            .rev()
            .map(Self::row_to_record)
            .collect()
    }
}
