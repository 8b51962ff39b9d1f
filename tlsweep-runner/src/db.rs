//! Database setup
//!
//! Builds the connection pool for the configured database and prepares the
//! report collection table.

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Builds a pool for `database_name` on the server at `database_url`
///
/// The pool connects lazily, so an unreachable server only surfaces on the
/// first query.
pub fn create_pool(database_url: &str, database_name: &str) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?.database(database_name);

    Ok(PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options))
}

/// Creates the report collection table if it does not exist
pub async fn ensure_collection(pool: &PgPool, collection: &str) -> Result<(), sqlx::Error> {
    for statement in collection_statements(collection) {
        sqlx::query(&statement).execute(pool).await?;
    }

    tracing::info!("Collection {} is ready", collection);
    Ok(())
}

/// DDL for the collection table and its host index, in execution order
fn collection_statements(collection: &str) -> [String; 2] {
    [
        format!(
            r#"
        CREATE TABLE IF NOT EXISTS {collection} (
            id TEXT PRIMARY KEY,
            host TEXT NOT NULL,
            report JSONB NOT NULL,
            ingested_at TIMESTAMPTZ NOT NULL
        )
        "#
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{collection}_host ON {collection}(host, ingested_at DESC)"
        ),
    ]
}
