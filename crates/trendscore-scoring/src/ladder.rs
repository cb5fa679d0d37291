//! Suggested retail prices at fixed markups over break-even.

use rust_decimal::{Decimal, RoundingStrategy};
use trendscore_core::{CostBreakdown, PriceLadder};

use crate::error::ScoringError;

/// Markups applied to the break-even floor, lowest tier first: 1.3x, 1.6x, 2.0x.
pub const LADDER_MULTIPLIERS: [Decimal; 3] = [
    Decimal::from_parts(13, 0, 0, false, 1),
    Decimal::from_parts(16, 0, 0, false, 1),
    Decimal::from_parts(20, 0, 0, false, 1),
];

/// Build the three-tier price ladder for a cost structure.
///
/// Each tier is `break_even * multiplier` rounded to cents, midpoint away
/// from zero. A zero floor yields `[0, 0, 0]`; callers must not take a
/// margin against that.
///
/// # Errors
///
/// Returns [`ScoringError::ComputationGuard`] if the floor or any tier
/// leaves the decimal range.
pub fn price_ladder(costs: &CostBreakdown) -> Result<PriceLadder, ScoringError> {
    let overflow =
        || ScoringError::ComputationGuard("price ladder arithmetic overflowed".to_string());

    let base = costs.break_even().ok_or_else(overflow)?;
    let mut tiers = [Decimal::ZERO; 3];
    for (tier, multiplier) in tiers.iter_mut().zip(LADDER_MULTIPLIERS) {
        *tier = base
            .checked_mul(multiplier)
            .map(round_cents)
            .ok_or_else(overflow)?;
    }

    let [low, mid, high] = tiers;
    Ok(PriceLadder::new(low, mid, high))
}

/// Returns `true` if the ladder keeps its guarantees for this floor: strictly
/// increasing, with even the lowest tier above break-even.
///
/// Fails for a zero floor and for floors of a few cents, where cent rounding
/// collapses adjacent tiers.
#[must_use]
pub fn ladder_holds(ladder: &PriceLadder, costs: &CostBreakdown) -> bool {
    costs
        .break_even()
        .is_some_and(|base| ladder.low() > base)
        && ladder.is_strictly_increasing()
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs(cogs: &str, fees: &str, shipping: &str) -> CostBreakdown {
        CostBreakdown::new(
            cogs.parse().unwrap(),
            fees.parse().unwrap(),
            shipping.parse().unwrap(),
        )
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn ladder_for(c: &CostBreakdown) -> PriceLadder {
        price_ladder(c).unwrap()
    }

    #[test]
    fn ladder_for_four_fifty_floor() {
        let ladder = ladder_for(&costs("2.5", "0.8", "1.2"));
        assert_eq!(ladder.low(), dec("5.85"));
        assert_eq!(ladder.mid(), dec("7.2"));
        assert_eq!(ladder.high(), dec("9.0"));
    }

    #[test]
    fn ladder_for_unit_floor() {
        let ladder = ladder_for(&costs("0.5", "0.3", "0.2"));
        assert_eq!(ladder.prices(), &[dec("1.3"), dec("1.6"), dec("2.0")]);
    }

    #[test]
    fn ladder_rounds_half_away_from_zero() {
        // 0.05 * 1.3 = 0.065 -> 0.07
        let ladder = ladder_for(&costs("0.05", "0", "0"));
        assert_eq!(ladder.low(), dec("0.07"));
        assert_eq!(ladder.mid(), dec("0.08"));
        assert_eq!(ladder.high(), dec("0.10"));
    }

    #[test]
    fn ladder_rounds_sub_cent_costs() {
        // 3.335 * 1.3 = 4.3355 -> 4.34; 3.335 * 1.6 = 5.336 -> 5.34; 6.67
        let ladder = ladder_for(&costs("3.335", "0", "0"));
        assert_eq!(ladder.prices(), &[dec("4.34"), dec("5.34"), dec("6.67")]);
    }

    #[test]
    fn zero_floor_gives_zero_ladder() {
        let c = costs("0", "0", "0");
        let ladder = ladder_for(&c);
        assert_eq!(ladder.prices(), &[Decimal::ZERO; 3]);
        assert!(!ladder_holds(&ladder, &c));
    }

    #[test]
    fn tiny_floor_collapses() {
        // 0.01 -> [0.01, 0.02, 0.02]
        let c = costs("0.01", "0", "0");
        let ladder = ladder_for(&c);
        assert!(!ladder_holds(&ladder, &c));
    }

    #[test]
    fn typical_floor_holds() {
        let c = costs("2.5", "0.8", "1.2");
        assert!(ladder_holds(&ladder_for(&c), &c));
    }

    #[test]
    fn oversized_floor_is_guard_failure_not_panic() {
        let c = CostBreakdown::new(Decimal::MAX / Decimal::TWO, Decimal::ZERO, Decimal::ZERO);
        let err = price_ladder(&c).unwrap_err();
        assert!(matches!(err, ScoringError::ComputationGuard(_)), "{err:?}");
    }

    #[test]
    fn unsummable_costs_are_guard_failure() {
        let c = CostBreakdown::new(Decimal::MAX, Decimal::MAX, Decimal::ZERO);
        assert!(matches!(
            price_ladder(&c),
            Err(ScoringError::ComputationGuard(_))
        ));
        assert!(!ladder_holds(&PriceLadder::new(Decimal::ONE, Decimal::TWO, Decimal::TEN), &c));
    }
}
