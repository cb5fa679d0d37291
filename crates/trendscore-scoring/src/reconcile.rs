//! Identity-keyed merge of scored trends and the ranking order.

use std::cmp::Ordering;
use std::collections::HashMap;

use trendscore_core::ScoredTrend;

/// Ranking order: higher `profit_score` first, then `name` ascending
/// (byte-wise).
#[must_use]
pub fn ranking_order(a: &ScoredTrend, b: &ScoredTrend) -> Ordering {
    b.profit_score
        .cmp(&a.profit_score)
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort a collection into ranking order.
pub fn rank(trends: &mut [ScoredTrend]) {
    trends.sort_by(ranking_order);
}

/// Merge `incoming` into `existing` by `name` and return the ranked result.
///
/// An incoming record whose name already exists replaces that record
/// wholesale, `created_at` included; otherwise it is appended. Later records
/// win over earlier ones, both within `existing` and within `incoming`, so
/// the output never holds two records with the same name.
#[must_use]
pub fn reconcile(existing: Vec<ScoredTrend>, incoming: Vec<ScoredTrend>) -> Vec<ScoredTrend> {
    let mut merged: Vec<ScoredTrend> = Vec::with_capacity(existing.len() + incoming.len());
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(merged.capacity());

    for trend in existing.into_iter().chain(incoming) {
        if let Some(&slot) = slots.get(&trend.name) {
            merged[slot] = trend;
        } else {
            slots.insert(trend.name.clone(), merged.len());
            merged.push(trend);
        }
    }

    rank(&mut merged);
    merged
}
