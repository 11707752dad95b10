//! Unified application error.
//!
//! One taxonomy for the whole pipeline: upstream oracle failures, snapshot
//! validation failures, and store failures each get their own variant so
//! callers can tell "the oracle is down" apart from "our store is broken".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    /// Transport failure, timeout, or a non-success status from the oracle.
    #[error("Oracle unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The oracle responded, but the body is not the expected shape.
    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),

    /// The snapshot parsed but fails divisor validation.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A persistence append failed. Logged by the ingestion path, never
    /// surfaced to the ingestion caller.
    #[error("Store write failed: {0}")]
    StoreWriteFailed(String),

    /// A query window fetch failed. Always surfaced to the caller.
    #[error("Store read failed: {0}")]
    StoreReadFailed(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::UpstreamUnavailable(_)
            | AppError::MalformedResponse(_)
            | AppError::InvalidSnapshot(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::StoreWriteFailed(_)
            | AppError::StoreReadFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
