use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Marketplace a trend signal was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Platform {
    Tiktok,
    Etsy,
    Gumroad,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Tiktok, Platform::Etsy, Platform::Gumroad];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok",
            Platform::Etsy => "etsy",
            Platform::Gumroad => "gumroad",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownPlatform(s.to_string()))
    }
}

/// The three per-unit cost components of a product, in one currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub cogs: Decimal,
    pub fees: Decimal,
    pub shipping: Decimal,
}

impl CostBreakdown {
    #[must_use]
    pub fn new(cogs: Decimal, fees: Decimal, shipping: Decimal) -> Self {
        Self {
            cogs,
            fees,
            shipping,
        }
    }

    /// Sum of all cost components: the minimum price that loses no money.
    ///
    /// `None` if the sum leaves the decimal range.
    #[must_use]
    pub fn break_even(&self) -> Option<Decimal> {
        self.cogs
            .checked_add(self.fees)
            .and_then(|sum| sum.checked_add(self.shipping))
    }
}

/// Unscored input describing one trend's observed popularity and cost
/// structure, as handed over by the ingestion side.
///
/// Monetary fields are decimals; in YAML/JSON they are best written as quoted
/// strings (`"2.50"`) so no binary float rounding sneaks in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSignal {
    /// Human-readable trend identifier; also the identity key once scored.
    pub name: String,
    pub platform: Platform,
    /// Unit-less, platform-comparable popularity signal.
    pub velocity: f64,
    pub cogs: Decimal,
    pub fees: Decimal,
    pub shipping: Decimal,
}

impl RawSignal {
    #[must_use]
    pub fn costs(&self) -> CostBreakdown {
        CostBreakdown::new(self.cogs, self.fees, self.shipping)
    }
}

/// Three ascending suggested retail prices derived from the break-even floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceLadder([Decimal; 3]);

impl PriceLadder {
    #[must_use]
    pub fn new(low: Decimal, mid: Decimal, high: Decimal) -> Self {
        Self([low, mid, high])
    }

    /// The lowest tier; margin is always reported against this price.
    #[must_use]
    pub fn low(&self) -> Decimal {
        self.0[0]
    }

    #[must_use]
    pub fn mid(&self) -> Decimal {
        self.0[1]
    }

    #[must_use]
    pub fn high(&self) -> Decimal {
        self.0[2]
    }

    #[must_use]
    pub fn prices(&self) -> &[Decimal; 3] {
        &self.0
    }

    #[must_use]
    pub fn is_strictly_increasing(&self) -> bool {
        self.0.windows(2).all(|w| w[0] < w[1])
    }
}

/// A [`RawSignal`] after pricing and scoring. Identity key is `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTrend {
    pub name: String,
    pub platform: Platform,
    pub velocity: f64,
    pub cogs: Decimal,
    pub fees: Decimal,
    pub shipping: Decimal,
    pub price_ladder: PriceLadder,
    /// Percentage of `price_ladder.low()` retained after costs.
    pub margin: Decimal,
    /// Composite ranking signal in `[0, 100]`.
    pub profit_score: u8,
    pub created_at: DateTime<Utc>,
}

impl ScoredTrend {
    #[must_use]
    pub fn costs(&self) -> CostBreakdown {
        CostBreakdown::new(self.cogs, self.fees, self.shipping)
    }
}
