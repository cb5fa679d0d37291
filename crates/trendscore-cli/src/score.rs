//! Scoring command handler.
//!
//! Loads a signals file, runs one scoring pass against either Postgres or an
//! empty in-memory store, and prints the resulting ranking. Rejected signals
//! are reported and skipped; only persistence failures abort the command.

use std::path::Path;

use trendscore_core::{AppConfig, MemoryTrendStore};
use trendscore_scoring::{run_scoring_pass, Rejection, ScoringReport};

use crate::rank::print_table;

pub(crate) fn rejection_line(rejection: &Rejection) -> String {
    format!("  #{} {:?}: {}", rejection.index, rejection.name, rejection.error)
}

fn print_report(report: &ScoringReport, dry_run: bool) {
    let verb = if dry_run { "would upsert" } else { "upserted" };
    println!(
        "pass {}: {verb} {} trend(s), rejected {}",
        report.pass_id,
        report.upserted,
        report.rejected.len()
    );
    for rejection in &report.rejected {
        println!("{}", rejection_line(rejection));
    }
    println!();
    print_table(&report.ranked);
}

/// Score the signals file at `path`.
///
/// With `dry_run` the pass runs against an empty [`MemoryTrendStore`], so the
/// printed ranking covers only this file and nothing is written.
///
/// # Errors
///
/// Returns an error if the signals file cannot be read or parsed, the
/// database is unreachable, or the upsert fails.
pub(crate) async fn run_score(config: &AppConfig, path: &Path, dry_run: bool) -> anyhow::Result<()> {
    let file = trendscore_core::load_signals(path)?;
    tracing::info!(
        path = %path.display(),
        signals = file.signals.len(),
        dry_run,
        "loaded signals file"
    );

    if file.signals.is_empty() {
        println!("no signals in {}; nothing to score", path.display());
        return Ok(());
    }

    let report = if dry_run {
        let store = MemoryTrendStore::new();
        run_scoring_pass(&store, file.signals).await?
    } else {
        let pool = trendscore_db::connect_pool_from_app_config(config).await?;
        let store = trendscore_db::PgTrendStore::new(pool);
        run_scoring_pass(&store, file.signals).await?
    };

    print_report(&report, dry_run);
    Ok(())
}
