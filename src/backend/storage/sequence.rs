/**
 * PostgreSQL Sequence Allocator
 *
 * Named counters live in the `counters` table, one row per name. Allocation
 * is a single upsert that creates the row at 1 or increments it, and returns
 * the new value in the same statement. Row-level locking inside PostgreSQL
 * serializes concurrent callers, so no value is ever handed out twice, even
 * across several server processes sharing the database.
 */

use async_trait::async_trait;
use sqlx::PgPool;

use crate::backend::storage::{SequenceAllocator, StoreError};

/// Sequence allocator backed by the `counters` table
#[derive(Debug, Clone)]
pub struct PgSequenceAllocator {
    pool: PgPool,
}

impl PgSequenceAllocator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceAllocator for PgSequenceAllocator {
    async fn next_value(&self, name: &str) -> Result<i64, StoreError> {
        let value: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO counters (name, value)
            VALUES ($1, 1)
            ON CONFLICT (name) DO UPDATE SET value = counters.value + 1
            RETURNING value
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Allocated {} from sequence '{}'", value, name);
        Ok(value)
    }
}
