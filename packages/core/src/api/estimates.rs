//! Gas estimate API endpoints.
//!
//! - `POST /gas-estimate` — trigger one ingestion cycle
//! - `GET /gas-estimate` — raw recent history (insertion order)
//! - `GET /gas-estimate/average` — per-tier rolling averages
//!
//! The query window is the configured record count, not a caller-supplied
//! parameter — callers get the operational window the service was
//! deployed with.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::estimates::{AveragedEstimate, EstimateRecord, Tier};
use crate::ingestion::IngestionService;
use crate::query::QueryService;

/// Shared state for the estimates routes.
pub struct EstimatesApiState {
    pub ingestion: Arc<IngestionService>,
    pub query: Arc<QueryService>,
    /// "Last N records" window used by both read endpoints.
    pub window_records: usize,
}

pub type EstimatesState = Arc<EstimatesApiState>;

/// Create the estimates router.
pub fn create_estimates_router(state: EstimatesState) -> Router {
    Router::new()
        .route(
            "/gas-estimate",
            get(get_recent_estimates).post(trigger_ingestion),
        )
        .route("/gas-estimate/average", get(get_average_estimates))
        .with_state(state)
}

/// Run one ingestion cycle and report its outcome.
async fn trigger_ingestion(State(state): State<EstimatesState>) -> Result<Json<Value>, AppError> {
    let outcome = state.ingestion.ingest().await?;
    Ok(Json(json!({
        "status": "ok",
        "blockNum": outcome.block_num,
        "recordsSubmitted": outcome.records_submitted,
    })))
}

/// The raw recent window, oldest first.
async fn get_recent_estimates(
    State(state): State<EstimatesState>,
) -> Result<Json<Vec<EstimateRecord>>, AppError> {
    let records = state.query.recent_raw(state.window_records).await?;
    Ok(Json(records))
}

/// Per-tier averages over the recent window. An empty window serializes
/// as `{}`.
async fn get_average_estimates(
    State(state): State<EstimatesState>,
) -> Result<Json<BTreeMap<Tier, AveragedEstimate>>, AppError> {
    let averages = state.query.recent_averages(state.window_records).await?;
    Ok(Json(averages))
}
