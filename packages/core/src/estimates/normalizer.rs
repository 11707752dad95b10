//! Snapshot normalization.
//!
//! Maps one raw oracle snapshot into exactly four `EstimateRecord`s, one
//! per tier. The oracle quotes prices in tenths of gwei scaled by a
//! per-tier divisor: `average_calc` for the Fastest, Fast and Standard
//! tiers, `safelow_calc` for Safelow. The asymmetry comes from the oracle
//! schema itself and is preserved here per tier rather than assumed
//! uniform.

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::estimates::types::{EstimateRecord, Tier};
use crate::services::oracle::RawSnapshot;

/// Convert a snapshot into one record per tier.
///
/// Pure apart from the caller-supplied `observed_at`, which is stamped on
/// all four records unchanged so they represent a single atomic
/// observation. A zero, negative, non-finite or missing divisor fails with
/// `InvalidSnapshot` before any record is built.
pub fn normalize(
    snapshot: &RawSnapshot,
    observed_at: DateTime<Utc>,
) -> Result<[EstimateRecord; 4], AppError> {
    let common_divisor = validated_divisor(snapshot.average_calc, "average_calc")?;
    let safelow_divisor = validated_divisor(snapshot.safelow_calc, "safelow_calc")?;

    let record = |tier: Tier, raw_price: f64, wait: f64, divisor: f64| EstimateRecord {
        tier,
        cost_per_gwei: raw_price / divisor,
        wait_time_in_min: wait,
        block_num: snapshot.block_num,
        created_at: observed_at,
    };

    Ok([
        record(Tier::Fastest, snapshot.fastest, snapshot.fastest_wait, common_divisor),
        record(Tier::Fast, snapshot.fast, snapshot.fast_wait, common_divisor),
        record(Tier::Standard, snapshot.average, snapshot.avg_wait, common_divisor),
        record(Tier::Safelow, snapshot.safe_low, snapshot.safe_low_wait, safelow_divisor),
    ])
}

fn validated_divisor(divisor: Option<f64>, field: &str) -> Result<f64, AppError> {
    match divisor {
        Some(value) if value.is_finite() && value > 0.0 => Ok(value),
        Some(value) => Err(AppError::InvalidSnapshot(format!(
            "divisor {field} must be a positive finite number, got {value}"
        ))),
        None => Err(AppError::InvalidSnapshot(format!("divisor {field} is missing"))),
    }
}
