//! Read-only ranking output.

use chrono::Utc;
use rust_decimal::Decimal;
use trendscore_core::ScoredTrend;

fn format_margin(margin: Decimal) -> String {
    format!("{}%", margin.round_dp(2))
}

fn format_ladder(trend: &ScoredTrend) -> String {
    let [low, mid, high] = trend.price_ladder.prices();
    format!("{low:.2} / {mid:.2} / {high:.2}")
}

/// Escape pipes so a trend name cannot split a markdown table cell.
fn markdown_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// One fixed-width table row; `rank` is 1-based.
pub(crate) fn table_row(rank: usize, trend: &ScoredTrend) -> String {
    format!(
        "{:<5}{:<32}{:<10}{:<7}{:<10}{}",
        rank,
        trend.name,
        trend.platform.as_str(),
        trend.profit_score,
        format_margin(trend.margin),
        format_ladder(trend)
    )
}

/// One markdown table row; `rank` is 1-based.
pub(crate) fn markdown_row(rank: usize, trend: &ScoredTrend) -> String {
    format!(
        "| {} | {} | {} | {} | {} | {} |",
        rank,
        markdown_cell(&trend.name),
        trend.platform,
        trend.profit_score,
        format_margin(trend.margin),
        format_ladder(trend)
    )
}

/// Print a fixed-width ranking table, one row per trend.
pub(crate) fn print_table(trends: &[ScoredTrend]) {
    println!(
        "{:<5}{:<32}{:<10}{:<7}{:<10}LADDER",
        "RANK", "NAME", "PLATFORM", "SCORE", "MARGIN"
    );
    for (i, trend) in trends.iter().enumerate() {
        println!("{}", table_row(i + 1, trend));
    }
}

fn print_markdown(trends: &[ScoredTrend]) {
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");

    println!("# Trend Ranking");
    println!();
    println!("**Generated**: {now}");
    println!("**Trends**: {}", trends.len());
    println!();
    println!("| Rank | Name | Platform | Score | Margin | Ladder |");
    println!("|------|------|----------|-------|--------|--------|");
    for (i, trend) in trends.iter().enumerate() {
        println!("{}", markdown_row(i + 1, trend));
    }
}

/// Print the top `limit` stored trends in ranking order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_rank(pool: &sqlx::PgPool, limit: u32, markdown: bool) -> anyhow::Result<()> {
    let trends = trendscore_db::list_ranked_trends(pool, Some(i64::from(limit))).await?;

    if trends.is_empty() {
        println!("no scored trends found; run `score` first");
        return Ok(());
    }

    if markdown {
        print_markdown(&trends);
    } else {
        print_table(&trends);
    }
    Ok(())
}
