/// Liveness probe. Returns `ok` with a 200 status.
pub async fn health() -> &'static str {
    "ok"
}
