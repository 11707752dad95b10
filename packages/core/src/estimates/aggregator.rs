//! Two-stage fold over a window of estimate records.
//!
//! Stage one partitions records by tier into running sums; stage two
//! derives per-tier averages and the display label. Tiers with no records
//! in the window are simply absent from the output — they are never
//! synthesized with zero counts, so the averaging stage can rely on
//! `num_records >= 1` for every tier it sees.

use std::collections::BTreeMap;

use crate::estimates::types::{AveragedEstimate, EstimateRecord, GroupedEstimate, Tier};
use crate::format::format_num;

/// Decimal precision for the formatted averages.
const AVG_DECIMALS: u32 = 6;

/// Accumulate per-tier sums over `records` in sequence order.
pub fn group(records: &[EstimateRecord]) -> BTreeMap<Tier, GroupedEstimate> {
    let mut grouped: BTreeMap<Tier, GroupedEstimate> = BTreeMap::new();

    for record in records {
        let entry = grouped.entry(record.tier).or_default();
        entry.total_cost_per_gwei += record.cost_per_gwei;
        entry.total_wait_time_in_min += record.wait_time_in_min;
        entry.num_records += 1;
    }

    grouped
}

/// Derive averages and labels for every tier present in `grouped`.
pub fn average(grouped: BTreeMap<Tier, GroupedEstimate>) -> BTreeMap<Tier, AveragedEstimate> {
    grouped
        .into_iter()
        .map(|(tier, group)| {
            // Grouping never emits a tier with zero records.
            let count = group.num_records as f64;
            let avg_cost = group.total_cost_per_gwei / count;
            let avg_wait = group.total_wait_time_in_min / count;

            let avg_wait_time_in_min = format_num(avg_wait, AVG_DECIMALS);
            // The ceiling applies to the displayed average: a wait that
            // formats to "3" must label as "< 3m", not "< 4m".
            let wait_ceiling = avg_wait_time_in_min
                .parse::<f64>()
                .unwrap_or(avg_wait)
                .ceil() as i64;

            let averaged = AveragedEstimate {
                total_cost_per_gwei: group.total_cost_per_gwei,
                total_wait_time_in_min: group.total_wait_time_in_min,
                num_records: group.num_records,
                avg_cost_per_gwei: format_num(avg_cost, AVG_DECIMALS),
                avg_wait_time_in_min,
                label: format!("{tier} < {wait_ceiling}m"),
                tier,
            };
            (tier, averaged)
        })
        .collect()
}

/// Group then average in one call — the shape the query path uses.
pub fn aggregate(records: &[EstimateRecord]) -> BTreeMap<Tier, AveragedEstimate> {
    average(group(records))
}
