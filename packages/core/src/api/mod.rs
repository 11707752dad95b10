//! HTTP surface: route assembly and handlers.

pub mod estimates;
pub mod health;

use std::sync::Arc;

use axum::{body::Body, http::header, response::Response, routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::metrics::AppMetrics;

pub use estimates::{create_estimates_router, EstimatesApiState, EstimatesState};

/// Assemble the full application router. Shared by `main` and the
/// integration tests so both exercise the same wiring.
pub fn create_app(state: EstimatesState, metrics: Arc<AppMetrics>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/metrics",
            get(move || {
                let metrics = metrics.clone();
                async move { render_metrics(&metrics) }
            }),
        )
        .merge(create_estimates_router(state))
        .layer(CorsLayer::permissive())
}

fn render_metrics(metrics: &AppMetrics) -> Response {
    match metrics.render() {
        Ok(body) => Response::builder()
            .status(200)
            .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
            .body(Body::from(body))
            .expect("metrics response should be valid"),
        Err(err) => Response::builder()
            .status(500)
            .body(Body::from(format!("metrics error: {err}")))
            .expect("metrics error response should be valid"),
    }
}
