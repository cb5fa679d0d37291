//! Margin at a given price.

use rust_decimal::Decimal;
use trendscore_core::CostBreakdown;

use crate::error::ScoringError;

/// A price known to be strictly positive, so dividing by it is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PositivePrice(Decimal);

impl PositivePrice {
    /// Returns `None` for zero or negative prices.
    #[must_use]
    pub fn new(price: Decimal) -> Option<Self> {
        (price > Decimal::ZERO).then_some(Self(price))
    }

    #[must_use]
    pub fn get(self) -> Decimal {
        self.0
    }
}

/// Percentage of `price` retained after all cost components:
/// `((price - cogs - fees - shipping) / price) * 100`.
///
/// Negative when costs exceed the price; always below 100 when any cost is
/// positive.
///
/// # Errors
///
/// Returns [`ScoringError::ComputationGuard`] if the arithmetic overflows the
/// decimal range.
pub fn margin_pct(price: PositivePrice, costs: &CostBreakdown) -> Result<Decimal, ScoringError> {
    let price = price.get();
    let overflow = || ScoringError::ComputationGuard("margin arithmetic overflowed".to_string());

    let retained = price
        .checked_sub(costs.cogs)
        .and_then(|r| r.checked_sub(costs.fees))
        .and_then(|r| r.checked_sub(costs.shipping))
        .ok_or_else(overflow)?;

    retained
        .checked_div(price)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(overflow)
}

/// Checked entry point for callers holding a plain decimal price.
///
/// # Errors
///
/// Returns [`ScoringError::ComputationGuard`] if `price` is zero or negative,
/// or if the arithmetic overflows.
pub fn margin_at(price: Decimal, costs: &CostBreakdown) -> Result<Decimal, ScoringError> {
    let price = PositivePrice::new(price).ok_or_else(|| {
        ScoringError::ComputationGuard(format!(
            "margin requested against non-positive price {price}"
        ))
    })?;
    margin_pct(price, costs)
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

    fn price(p: &str) -> PositivePrice {
        PositivePrice::new(p.parse().unwrap()).unwrap()
    }

    #[test]
    fn positive_price_rejects_zero_and_negative() {
        assert!(PositivePrice::new(Decimal::ZERO).is_none());
        assert!(PositivePrice::new(Decimal::new(-1, 2)).is_none());
        assert!(PositivePrice::new(Decimal::new(1, 2)).is_some());
    }

    #[test]
    fn margin_matches_formula() {
        let m = margin_pct(price("5.85"), &costs("2.5", "0.8", "1.2")).unwrap();
        // (5.85 - 4.5) / 5.85 * 100 = 23.0769...
        assert!(m > Decimal::new(2307, 2) && m < Decimal::new(2308, 2), "got {m}");
    }

    #[test]
    fn margin_is_zero_at_break_even() {
        let m = margin_pct(price("4.50"), &costs("2.5", "0.8", "1.2")).unwrap();
        assert_eq!(m, Decimal::ZERO);
    }

    #[test]
    fn margin_is_negative_below_break_even() {
        let m = margin_pct(price("4.00"), &costs("2.5", "0.8", "1.2")).unwrap();
        assert!(m < Decimal::ZERO);
    }

    #[test]
    fn margin_is_hundred_with_no_costs() {
        let m = margin_pct(price("3"), &costs("0", "0", "0")).unwrap();
        assert_eq!(m, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn margin_at_rejects_zero_price() {
        let err = margin_at(Decimal::ZERO, &costs("0", "0", "0")).unwrap_err();
        assert!(matches!(err, ScoringError::ComputationGuard(_)));
    }

    #[test]
    fn margin_at_rejects_negative_price() {
        let err = margin_at(Decimal::new(-5, 0), &costs("1", "0", "0")).unwrap_err();
        assert!(matches!(err, ScoringError::ComputationGuard(_)));
    }

    #[test]
    fn overflow_surfaces_as_guard_failure() {
        let huge = CostBreakdown::new(Decimal::MAX, Decimal::MAX, Decimal::ZERO);
        let err = margin_pct(price("1"), &huge).unwrap_err();
        assert!(matches!(err, ScoringError::ComputationGuard(_)));
    }
}
