//! SQLite pool creation and schema setup.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS gas_estimates (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tier TEXT NOT NULL,
        cost_per_gwei REAL NOT NULL,
        wait_time_in_min REAL NOT NULL,
        block_num INTEGER NOT NULL,
        created_at TEXT NOT NULL
    )
";

/// Open (creating if missing) the database at `database_url` and apply the
/// schema.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // An in-memory SQLite database exists per connection; cap the pool at
    // one connection so tests talk to a single database.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::query(SCHEMA).execute(&pool).await?;
    Ok(pool)
}
