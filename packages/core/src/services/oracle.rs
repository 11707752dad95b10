//! HTTP client for the external gas-price oracle.
//!
//! One GET per fetch, no retries — retry policy, if any, belongs to the
//! caller. The underlying reqwest client is built with a hard timeout so a
//! hung oracle surfaces as `UpstreamUnavailable` instead of blocking a
//! poll cycle forever.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::AppError;

/// Default bound on the oracle round trip.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One point-in-time response from the gas-price oracle.
///
/// Field names match the upstream JSON exactly. The per-tier scaling
/// divisors are optional at the parse level so a missing divisor is
/// reported as an invalid snapshot during normalization rather than as a
/// generic parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshot {
    pub fastest: f64,
    pub fast: f64,
    pub average: f64,
    #[serde(rename = "safeLow")]
    pub safe_low: f64,

    #[serde(rename = "fastestWait")]
    pub fastest_wait: f64,
    #[serde(rename = "fastWait")]
    pub fast_wait: f64,
    #[serde(rename = "avgWait")]
    pub avg_wait: f64,
    #[serde(rename = "safeLowWait")]
    pub safe_low_wait: f64,

    #[serde(rename = "blockNum")]
    pub block_num: u64,

    pub average_calc: Option<f64>,
    pub safelow_calc: Option<f64>,
}

#[derive(Clone)]
pub struct OracleClient {
    url: String,
    http: Client,
}

impl OracleClient {
    /// Build a client for the given oracle endpoint with the default
    /// fetch timeout.
    pub fn new(url: String) -> Self {
        Self::with_timeout(url, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(url: String, timeout: Duration) -> Self {
        Self {
            url,
            // Construction only fails on TLS backend misconfiguration,
            // same failure mode as `Client::new`.
            http: Client::builder()
                .timeout(timeout)
                .build()
                .expect("reqwest client construction"),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse one gas-price snapshot.
    pub async fn fetch_snapshot(&self) -> Result<RawSnapshot, AppError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|err| AppError::UpstreamUnavailable(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamUnavailable(format!(
                "oracle returned HTTP {}",
                response.status()
            )));
        }

        response
            .json::<RawSnapshot>()
            .await
            .map_err(|err| AppError::MalformedResponse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SNAPSHOT_BODY: &str = r#"{
        "fastest": 40.0,
        "fast": 10.0,
        "average": 10.0,
        "safeLow": 10.0,
        "fastestWait": 0.5,
        "fastWait": 0.5,
        "avgWait": 0.5,
        "safeLowWait": 0.5,
        "blockNum": 5406970,
        "average_calc": 10.0,
        "safelow_calc": 10.0
    }"#;

    #[tokio::test]
    async fn fetch_snapshot_parses_oracle_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(SNAPSHOT_BODY, "application/json"))
            .mount(&server)
            .await;

        let client = OracleClient::new(server.uri());
        let snapshot = client.fetch_snapshot().await.unwrap();

        assert_eq!(snapshot.fastest, 40.0);
        assert_eq!(snapshot.block_num, 5_406_970);
        assert_eq!(snapshot.average_calc, Some(10.0));
    }

    #[tokio::test]
    async fn missing_divisors_still_parse() {
        let body = r#"{
            "fastest": 40.0, "fast": 10.0, "average": 10.0, "safeLow": 10.0,
            "fastestWait": 0.5, "fastWait": 0.5, "avgWait": 0.5, "safeLowWait": 0.5,
            "blockNum": 100
        }"#;
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let snapshot = OracleClient::new(server.uri()).fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.average_calc, None);
        assert_eq!(snapshot.safelow_calc, None);
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = OracleClient::new(server.uri()).fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamUnavailable(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unparseable_body_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
            .mount(&server)
            .await;

        let err = OracleClient::new(server.uri()).fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn slow_oracle_times_out_as_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(SNAPSHOT_BODY, "application/json")
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let client = OracleClient::with_timeout(server.uri(), Duration::from_millis(50));
        let err = client.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamUnavailable(_)), "got {err:?}");
    }
}
