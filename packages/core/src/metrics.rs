//! Prometheus metrics registry for the gas estimate tracker.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and pass it to
//! the ingestion service. Exposed at `GET /metrics` in Prometheus text
//! exposition format (`text/plain; version=0.0.4`).

use prometheus::{Counter, Encoder, Gauge, Opts, Registry, TextEncoder};

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Total number of ingestion cycles attempted (success + failure).
    pub ingest_cycles_total: Counter,
    /// Total number of ingestion cycles aborted by a fetch or
    /// normalization failure.
    pub ingest_errors_total: Counter,
    /// Total number of fire-and-forget store writes that failed.
    pub store_write_errors_total: Counter,
    /// Block height of the most recently ingested snapshot.
    pub last_block_num: Gauge,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics. Returns an error if any metric
    /// name is invalid or duplicated (should not happen in practice).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let ingest_cycles_total = Counter::with_opts(Opts::new(
            "gas_estimate_tracker_ingest_cycles_total",
            "Total ingestion cycles attempted",
        ))?;

        let ingest_errors_total = Counter::with_opts(Opts::new(
            "gas_estimate_tracker_ingest_errors_total",
            "Ingestion cycles aborted by fetch or normalization failure",
        ))?;

        let store_write_errors_total = Counter::with_opts(Opts::new(
            "gas_estimate_tracker_store_write_errors_total",
            "Failed estimate store writes",
        ))?;

        let last_block_num = Gauge::with_opts(Opts::new(
            "gas_estimate_tracker_last_block_num",
            "Block height of the most recently ingested snapshot",
        ))?;

        registry.register(Box::new(ingest_cycles_total.clone()))?;
        registry.register(Box::new(ingest_errors_total.clone()))?;
        registry.register(Box::new(store_write_errors_total.clone()))?;
        registry.register(Box::new(last_block_num.clone()))?;

        Ok(Self {
            ingest_cycles_total,
            ingest_errors_total,
            store_write_errors_total,
            last_block_num,
            registry,
        })
    }

    /// Render all metrics in Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|err| prometheus::Error::Msg(format!("metrics not utf-8: {err}")))
    }
}
