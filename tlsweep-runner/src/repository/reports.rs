//! Reports repository
//!
//! Writes stored documents into the report collection, a Postgres table with
//! the report body kept as JSONB.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use tlsweep_core::domain::document::StoredDocument;

use crate::error::StoreError;

/// Repository trait for the report collection
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Inserts a new document; never updates an existing one
    async fn insert(&self, doc: &StoredDocument) -> Result<(), StoreError>;
}

/// Postgres implementation of ReportRepository
pub struct PgReportRepository {
    pool: PgPool,
    collection: String,
}

impl PgReportRepository {
    /// Creates a repository writing to `collection`
    ///
    /// # Arguments
    /// * `pool` - Connection pool for the configured database
    /// * `collection` - Table name, already validated as a plain identifier
    pub fn new(pool: PgPool, collection: String) -> Self {
        Self { pool, collection }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, doc: &StoredDocument) -> Result<(), StoreError> {
        sqlx::query(&insert_statement(&self.collection))
            .bind(&doc.id)
            .bind(&doc.host)
            .bind(Json(&doc.report))
            .bind(doc.ingested_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(&doc.id, e))?;

        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn insert_statement(collection: &str) -> String {
    format!(
        "INSERT INTO {} (id, host, report, ingested_at) VALUES ($1, $2, $3, $4)",
        collection
    )
}

fn map_insert_error(id: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateId(id.to_string());
        }
    }

    StoreError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_statement_targets_collection() {
        assert_eq!(
            insert_statement("ssllabs_raw"),
            "INSERT INTO ssllabs_raw (id, host, report, ingested_at) VALUES ($1, $2, $3, $4)"
        );
    }

    #[test]
    fn test_non_database_errors_are_not_duplicates() {
        let err = map_insert_error("example.com_x", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Database(sqlx::Error::PoolTimedOut)));
    }
}
