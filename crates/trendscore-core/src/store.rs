//! Persistence-collaborator contract for scored trends.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;

use thiserror::Error;

use crate::trends::ScoredTrend;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("partial write: {applied} of {expected} records applied")]
    PartialWrite { expected: usize, applied: usize },

    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Wrap any backend-specific error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Durable home of the scored-trend collection, keyed by trend `name`.
///
/// `upsert_batch` is all-or-nothing: after an `Err` the caller must assume
/// nothing about what was written and re-read before trusting a cached view.
/// Implementations do not retry internally.
pub trait TrendStore: Send + Sync {
    /// Every stored record, in no particular order.
    fn load_all(&self) -> impl Future<Output = Result<Vec<ScoredTrend>, StoreError>> + Send;

    /// Insert or fully overwrite one record per `name`. Returns the number of
    /// records written.
    fn upsert_batch(
        &self,
        trends: &[ScoredTrend],
    ) -> impl Future<Output = Result<usize, StoreError>> + Send;
}

/// Process-local store backed by a mutex-guarded map.
///
/// The whole batch is applied under one lock, which makes each upsert atomic
/// and serializes concurrent passes.
#[derive(Debug, Default)]
pub struct MemoryTrendStore {
    records: Mutex<BTreeMap<String, ScoredTrend>>,
}

impl MemoryTrendStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store; later duplicates of a name overwrite earlier ones.
    #[must_use]
    pub fn with_trends(trends: impl IntoIterator<Item = ScoredTrend>) -> Self {
        let records = trends
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect::<BTreeMap<_, _>>();
        Self {
            records: Mutex::new(records),
        }
    }

    /// Number of stored records, or 0 if the lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TrendStore for MemoryTrendStore {
    async fn load_all(&self) -> Result<Vec<ScoredTrend>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.values().cloned().collect())
    }

    async fn upsert_batch(&self, trends: &[ScoredTrend]) -> Result<usize, StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        for trend in trends {
            records.insert(trend.name.clone(), trend.clone());
        }
        Ok(trends.len())
    }
}
