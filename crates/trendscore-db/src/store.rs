//! Postgres-backed [`TrendStore`].

use sqlx::PgPool;
use trendscore_core::{ScoredTrend, StoreError, TrendStore};

use crate::trends::{list_ranked_trends, upsert_scored_trends};
use crate::DbError;

/// [`TrendStore`] over the `scored_trends` table.
#[derive(Debug, Clone)]
pub struct PgTrendStore {
    pool: PgPool,
}

impl PgTrendStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::PartialUpsert { expected, applied } => {
                StoreError::PartialWrite { expected, applied }
            }
            other => StoreError::backend(other),
        }
    }
}

impl TrendStore for PgTrendStore {
    async fn load_all(&self) -> Result<Vec<ScoredTrend>, StoreError> {
        let trends = list_ranked_trends(&self.pool, None).await?;
        tracing::debug!(rows = trends.len(), "loaded scored trends");
        Ok(trends)
    }

    async fn upsert_batch(&self, trends: &[ScoredTrend]) -> Result<usize, StoreError> {
        Ok(upsert_scored_trends(&self.pool, trends).await?)
    }
}
