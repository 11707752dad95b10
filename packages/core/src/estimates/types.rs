//! Core data types for gas estimates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of gas-price speed tiers.
///
/// Ordering follows decreasing speed so serialized maps keyed by tier come
/// out in a stable, human-friendly order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    Fastest,
    Fast,
    Standard,
    Safelow,
}

impl Tier {
    /// All tiers, in normalization output order.
    pub const ALL: [Tier; 4] = [Tier::Fastest, Tier::Fast, Tier::Standard, Tier::Safelow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Fastest => "Fastest",
            Tier::Fast => "Fast",
            Tier::Standard => "Standard",
            Tier::Safelow => "Safelow",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fastest" => Ok(Tier::Fastest),
            "Fast" => Ok(Tier::Fast),
            "Standard" => Ok(Tier::Standard),
            "Safelow" => Ok(Tier::Safelow),
            other => Err(format!("unknown tier: {other}")),
        }
    }
}

/// One persisted gas estimate for a single tier at a single observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRecord {
    #[serde(rename = "type")]
    pub tier: Tier,
    pub cost_per_gwei: f64,
    pub wait_time_in_min: f64,
    pub block_num: u64,
    pub created_at: DateTime<Utc>,
}

/// Per-tier running sums accumulated over a query window. Query-time only,
/// never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedEstimate {
    pub total_cost_per_gwei: f64,
    pub total_wait_time_in_min: f64,
    pub num_records: usize,
}

/// A grouped estimate plus its derived averages and display label.
///
/// The averages are carried as already-formatted strings so the JSON wire
/// shape matches what `format_num` produced, e.g. `"avgCostPerGwei": "5"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragedEstimate {
    pub total_cost_per_gwei: f64,
    pub total_wait_time_in_min: f64,
    pub num_records: usize,
    pub avg_cost_per_gwei: String,
    pub avg_wait_time_in_min: String,
    pub label: String,
    #[serde(rename = "type")]
    pub tier: Tier,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn tier_serializes_as_its_name() {
        assert_eq!(serde_json::to_string(&Tier::Safelow).unwrap(), "\"Safelow\"");
    }

    #[test]
    fn tier_round_trips_through_from_str() {
        for tier in Tier::ALL {
            assert_eq!(tier.as_str().parse::<Tier>().unwrap(), tier);
        }
        assert!("Turbo".parse::<Tier>().is_err());
    }

    #[test]
    fn record_uses_camel_case_wire_names() {
        let record = EstimateRecord {
            tier: Tier::Fastest,
            cost_per_gwei: 4.0,
            wait_time_in_min: 0.5,
            block_num: 100,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Fastest");
        assert_eq!(json["costPerGwei"], 4.0);
        assert_eq!(json["waitTimeInMin"], 0.5);
        assert_eq!(json["blockNum"], 100);
        assert!(json["createdAt"].is_string());
    }
}
