//! Composite profit score and scored-record assembly.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use trendscore_core::{RawSignal, ScoredTrend};

use crate::error::ScoringError;
use crate::ladder::{ladder_holds, price_ladder};
use crate::margin::margin_at;
use crate::validate::check_fields;

pub const VELOCITY_WEIGHT: f64 = 0.2;
pub const MARGIN_WEIGHT: f64 = 2.0;
pub const MAX_PROFIT_SCORE: u8 = 100;

/// `clamp(round(velocity * 0.2 + margin * 2), 0, 100)`.
///
/// Both weighted terms are summed before rounding. Non-decreasing in each
/// argument. A `NaN` sum scores 0; infinities clamp to the nearest bound.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn profit_score(velocity: f64, margin: Decimal) -> u8 {
    let margin = margin.to_f64().unwrap_or(f64::NAN);
    let raw = velocity * VELOCITY_WEIGHT + margin * MARGIN_WEIGHT;
    if raw.is_nan() {
        return 0;
    }

    // Clamped to [0, 100], so the cast is exact.
    raw.round().clamp(0.0, f64::from(MAX_PROFIT_SCORE)) as u8
}

/// Score one signal, stamping it with the current wall-clock time.
///
/// # Errors
///
/// See [`score_signal_at`].
pub fn score_signal(signal: &RawSignal) -> Result<ScoredTrend, ScoringError> {
    score_signal_at(signal, Utc::now())
}

/// Score one signal with an explicit `created_at`.
///
/// Computes the ladder from the cost floor, the margin at the ladder's lowest
/// tier, then the profit score.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidInput`] for malformed fields, and
/// [`ScoringError::ComputationGuard`] when the cost floor cannot produce a
/// usable ladder (zero floor, or one so small that cent rounding collapses
/// the tiers). Batches run through
/// [`validate_batch`](crate::validate::validate_batch) never hit the guard.
pub fn score_signal_at(
    signal: &RawSignal,
    created_at: DateTime<Utc>,
) -> Result<ScoredTrend, ScoringError> {
    check_fields(signal)?;

    let costs = signal.costs();
    let ladder = price_ladder(&costs)?;
    let margin = margin_at(ladder.low(), &costs)?;

    if !ladder_holds(&ladder, &costs) {
        return Err(ScoringError::ComputationGuard(format!(
            "price ladder {:?} for '{}' does not clear its break-even floor",
            ladder.prices(),
            signal.name
        )));
    }

    Ok(ScoredTrend {
        name: signal.name.clone(),
        platform: signal.platform,
        velocity: signal.velocity,
        cogs: signal.cogs,
        fees: signal.fees,
        shipping: signal.shipping,
        price_ladder: ladder,
        margin,
        profit_score: profit_score(signal.velocity, margin),
        created_at,
    })
}
