//! Scoring-pass orchestration.

use chrono::{DateTime, Utc};
use trendscore_core::{RawSignal, ScoredTrend, StoreError, TrendStore};
use uuid::Uuid;

use crate::error::ScoringError;
use crate::reconcile::reconcile;
use crate::scorer::score_signal_at;
use crate::validate::{validate_batch, Rejection};

/// Outcome of one scoring pass.
#[derive(Debug)]
pub struct ScoringReport {
    /// Correlates log lines for this pass.
    pub pass_id: Uuid,
    /// Full persisted collection after the merge, in ranking order.
    pub ranked: Vec<ScoredTrend>,
    /// Signals skipped by validation or by a computation guard.
    pub rejected: Vec<Rejection>,
    /// Records written by this pass.
    pub upserted: usize,
}

/// Validate and score a batch without touching storage.
///
/// Every accepted record shares `scored_at` as its `created_at`. Records that
/// fail validation or trip a guard are returned as rejections, ordered by
/// their input position; they never abort the rest of the batch.
#[must_use]
pub fn score_batch(
    signals: Vec<RawSignal>,
    scored_at: DateTime<Utc>,
) -> (Vec<ScoredTrend>, Vec<Rejection>) {
    let (accepted, mut rejected) = validate_batch(signals);
    let mut scored = Vec::with_capacity(accepted.len());

    for (index, signal) in accepted {
        match score_signal_at(&signal, scored_at) {
            Ok(trend) => scored.push(trend),
            Err(error) => rejected.push(Rejection {
                index,
                name: signal.name,
                error,
            }),
        }
    }

    rejected.sort_by_key(|r| r.index);
    (scored, rejected)
}

/// Run one full pass: validate, score, persist, and rank.
///
/// 1. Validate and score `signals` (see [`score_batch`]).
/// 2. Load the stored collection.
/// 3. Upsert the freshly scored records as one atomic batch.
/// 4. Merge them over the loaded collection and rank.
///
/// The ranking is built from the collection loaded in step 2 plus this pass's
/// own records, so everything this pass wrote is always visible in what it
/// returns.
///
/// # Errors
///
/// Returns [`ScoringError::Persistence`] if loading or upserting fails, or if
/// the store reports fewer writes than requested. Nothing is retried; after an
/// upsert failure the stored state is unknown and must be re-read.
pub async fn run_scoring_pass<S>(
    store: &S,
    signals: Vec<RawSignal>,
) -> Result<ScoringReport, ScoringError>
where
    S: TrendStore,
{
    let pass_id = Uuid::new_v4();
    let submitted = signals.len();
    let (scored, rejected) = score_batch(signals, Utc::now());

    for rejection in &rejected {
        tracing::warn!(
            %pass_id,
            index = rejection.index,
            name = %rejection.name,
            error = %rejection.error,
            "signal rejected"
        );
    }

    let existing = store.load_all().await?;

    let upserted = if scored.is_empty() {
        tracing::info!(%pass_id, submitted, "no signals survived validation; skipping upsert");
        0
    } else {
        let written = store.upsert_batch(&scored).await?;
        if written != scored.len() {
            return Err(StoreError::PartialWrite {
                expected: scored.len(),
                applied: written,
            }
            .into());
        }
        written
    };

    let ranked = reconcile(existing, scored);

    tracing::info!(
        %pass_id,
        submitted,
        upserted,
        rejected = rejected.len(),
        collection = ranked.len(),
        "scoring pass complete"
    );

    Ok(ScoringReport {
        pass_id,
        ranked,
        rejected,
        upserted,
    })
}
