//! Gas Estimates Module
//!
//! Normalization of raw oracle snapshots into tiered estimate records and
//! aggregation of stored records into per-tier rolling averages.

pub mod aggregator;
pub mod normalizer;
pub mod types;

pub use aggregator::aggregate;
pub use normalizer::normalize;
pub use types::{AveragedEstimate, EstimateRecord, GroupedEstimate, Tier};
