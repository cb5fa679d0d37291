//! Database operations for the `scored_trends` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use trendscore_core::{Platform, PriceLadder, ScoredTrend};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `scored_trends` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScoredTrendRow {
    pub id: i64,
    pub name: String,
    /// Lowercase platform name; constrained by a CHECK in the schema.
    pub platform: String,
    pub velocity: f64,
    pub cogs: Decimal,
    pub fees: Decimal,
    pub shipping: Decimal,
    pub price_low: Decimal,
    pub price_mid: Decimal,
    pub price_high: Decimal,
    pub margin: Decimal,
    /// `SMALLINT` in `[0, 100]`.
    pub profit_score: i16,
    /// When the record was scored, as set by the scoring pass.
    pub created_at: DateTime<Utc>,
    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
}

impl ScoredTrendRow {
    /// Convert back into the domain record.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidStoredValue`] if `platform` or `profit_score`
    /// hold values the domain type cannot represent.
    pub fn into_scored_trend(self) -> Result<ScoredTrend, DbError> {
        let platform = self
            .platform
            .parse::<Platform>()
            .map_err(|_| DbError::InvalidStoredValue {
                column: "platform",
                value: self.platform.clone(),
            })?;

        let profit_score =
            u8::try_from(self.profit_score).map_err(|_| DbError::InvalidStoredValue {
                column: "profit_score",
                value: self.profit_score.to_string(),
            })?;

        Ok(ScoredTrend {
            name: self.name,
            platform,
            velocity: self.velocity,
            cogs: self.cogs,
            fees: self.fees,
            shipping: self.shipping,
            price_ladder: PriceLadder::new(self.price_low, self.price_mid, self.price_high),
            margin: self.margin,
            profit_score,
            created_at: self.created_at,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, platform, velocity, cogs, fees, shipping, \
                                     price_low, price_mid, price_high, margin, profit_score, \
                                     created_at, updated_at \
                              FROM scored_trends";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Upsert a batch of scored trends inside a single transaction.
///
/// Conflicts on `name` overwrite every scored column, `created_at` included,
/// and bump `updated_at`; the row keeps its `id`. Rows are written in
/// byte-wise `name` order so concurrent batches lock shared names in the same
/// sequence. If any statement fails, or any row reports no write, the whole
/// batch is rolled back.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails, or
/// [`DbError::PartialUpsert`] if fewer rows were written than submitted.
pub async fn upsert_scored_trends(pool: &PgPool, trends: &[ScoredTrend]) -> Result<usize, DbError> {
    let mut ordered: Vec<&ScoredTrend> = trends.iter().collect();
    ordered.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

    let mut tx = pool.begin().await?;
    let mut applied = 0usize;

    for trend in ordered {
        let ladder = trend.price_ladder.prices();
        let result = sqlx::query(
            "INSERT INTO scored_trends \
                 (name, platform, velocity, cogs, fees, shipping, \
                  price_low, price_mid, price_high, margin, profit_score, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (name) DO UPDATE SET \
                 platform     = EXCLUDED.platform, \
                 velocity     = EXCLUDED.velocity, \
                 cogs         = EXCLUDED.cogs, \
                 fees         = EXCLUDED.fees, \
                 shipping     = EXCLUDED.shipping, \
                 price_low    = EXCLUDED.price_low, \
                 price_mid    = EXCLUDED.price_mid, \
                 price_high   = EXCLUDED.price_high, \
                 margin       = EXCLUDED.margin, \
                 profit_score = EXCLUDED.profit_score, \
                 created_at   = EXCLUDED.created_at, \
                 updated_at   = NOW()",
        )
        .bind(&trend.name)
        .bind(trend.platform.as_str())
        .bind(trend.velocity)
        .bind(trend.cogs)
        .bind(trend.fees)
        .bind(trend.shipping)
        .bind(ladder[0])
        .bind(ladder[1])
        .bind(ladder[2])
        .bind(trend.margin)
        .bind(i16::from(trend.profit_score))
        .bind(trend.created_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 1 {
            applied += 1;
        }
    }

    if applied != trends.len() {
        tx.rollback().await?;
        return Err(DbError::PartialUpsert {
            expected: trends.len(),
            applied,
        });
    }

    tx.commit().await?;
    tracing::debug!(rows = applied, "upserted scored trends");
    Ok(applied)
}

/// List scored trends in ranking order: `profit_score DESC`, then `name`
/// ascending in byte order (`COLLATE "C"`). `None` returns every row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or
/// [`DbError::InvalidStoredValue`] if a row cannot be converted.
pub async fn list_ranked_trends(
    pool: &PgPool,
    limit: Option<i64>,
) -> Result<Vec<ScoredTrend>, DbError> {
    // LIMIT NULL means no limit in Postgres.
    let rows = sqlx::query_as::<_, ScoredTrendRow>(&format!(
        "{SELECT_COLUMNS} ORDER BY profit_score DESC, name COLLATE \"C\" ASC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(ScoredTrendRow::into_scored_trend)
        .collect()
}

/// Return the scored trend with this exact name, or `None` if absent.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or
/// [`DbError::InvalidStoredValue`] if the row cannot be converted.
pub async fn get_scored_trend_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<ScoredTrend>, DbError> {
    let row = sqlx::query_as::<_, ScoredTrendRow>(&format!("{SELECT_COLUMNS} WHERE name = $1"))
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.map(ScoredTrendRow::into_scored_trend).transpose()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn make_row(platform: &str, profit_score: i16) -> ScoredTrendRow {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        ScoredTrendRow {
            id: 1,
            name: "Mushroom Lamp".to_string(),
            platform: platform.to_string(),
            velocity: 450.0,
            cogs: Decimal::new(25, 1),
            fees: Decimal::new(8, 1),
            shipping: Decimal::new(12, 1),
            price_low: Decimal::new(585, 2),
            price_mid: Decimal::new(720, 2),
            price_high: Decimal::new(900, 2),
            margin: Decimal::new(230_769, 4),
            profit_score,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn row_converts_to_domain_record() {
        let trend = make_row("etsy", 100).into_scored_trend().unwrap();
        assert_eq!(trend.platform, Platform::Etsy);
        assert_eq!(trend.profit_score, 100);
        assert_eq!(trend.price_ladder.low(), Decimal::new(585, 2));
        assert_eq!(trend.price_ladder.high(), Decimal::new(9, 0));
        assert_eq!(trend.costs().break_even(), Some(Decimal::new(45, 1)));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let err = make_row("myspace", 10).into_scored_trend().unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidStoredValue {
                column: "platform",
                ..
            }
        ));
    }

    #[test]
    fn negative_score_is_rejected() {
        let err = make_row("etsy", -1).into_scored_trend().unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidStoredValue {
                column: "profit_score",
                ..
            }
        ));
    }
}
