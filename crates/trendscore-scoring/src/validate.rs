//! Input checks applied before a signal is scored.

use std::collections::HashSet;

use rust_decimal::Decimal;
use trendscore_core::RawSignal;

use crate::error::{InvalidReason, ScoringError};
use crate::ladder::{ladder_holds, price_ladder};

/// Upper bound for any single cost component. Keeps every downstream
/// multiplication far inside the decimal range.
pub const MAX_COST_COMPONENT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// A signal skipped during a scoring pass, with its position in the input
/// batch and the reason it was dropped.
#[derive(Debug)]
pub struct Rejection {
    pub index: usize,
    pub name: String,
    pub error: ScoringError,
}

/// Field-level checks: name, velocity, and each cost component.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidInput`] naming the first failed check.
pub fn check_fields(signal: &RawSignal) -> Result<(), ScoringError> {
    if signal.name.trim().is_empty() {
        return Err(ScoringError::invalid(&signal.name, InvalidReason::EmptyName));
    }

    if !signal.velocity.is_finite() || signal.velocity < 0.0 {
        return Err(ScoringError::invalid(
            &signal.name,
            InvalidReason::InvalidVelocity,
        ));
    }

    for (component, amount) in [
        ("cogs", signal.cogs),
        ("fees", signal.fees),
        ("shipping", signal.shipping),
    ] {
        if amount < Decimal::ZERO {
            return Err(ScoringError::invalid(
                &signal.name,
                InvalidReason::NegativeCost { component },
            ));
        }
        if amount > MAX_COST_COMPONENT {
            return Err(ScoringError::invalid(
                &signal.name,
                InvalidReason::CostTooLarge { component },
            ));
        }
    }

    Ok(())
}

/// Full admission check for one signal: field checks plus a usable price
/// floor.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidInput`] if the signal must not be scored.
pub fn check_signal(signal: &RawSignal) -> Result<(), ScoringError> {
    check_fields(signal)?;

    // Components are capped by check_fields, so neither step can overflow.
    let costs = signal.costs();
    if costs.break_even() == Some(Decimal::ZERO) {
        return Err(ScoringError::invalid(
            &signal.name,
            InvalidReason::ZeroBreakEven,
        ));
    }
    if !ladder_holds(&price_ladder(&costs)?, &costs) {
        return Err(ScoringError::invalid(
            &signal.name,
            InvalidReason::LadderCollapsed,
        ));
    }

    Ok(())
}

/// Split a batch into signals fit for scoring and rejections.
///
/// Names must be unique within a batch: the first occurrence is kept and every
/// later one is rejected. Accepted signals keep their input order.
#[must_use]
pub fn validate_batch(signals: Vec<RawSignal>) -> (Vec<(usize, RawSignal)>, Vec<Rejection>) {
    let mut accepted = Vec::with_capacity(signals.len());
    let mut rejected = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, signal) in signals.into_iter().enumerate() {
        let verdict = check_signal(&signal).and_then(|()| {
            if seen.contains(&signal.name) {
                Err(ScoringError::invalid(
                    &signal.name,
                    InvalidReason::DuplicateName,
                ))
            } else {
                Ok(())
            }
        });

        match verdict {
            Ok(()) => {
                seen.insert(signal.name.clone());
                accepted.push((index, signal));
            }
            Err(error) => rejected.push(Rejection {
                index,
                name: signal.name,
                error,
            }),
        }
    }

    (accepted, rejected)
}
