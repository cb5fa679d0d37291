//! Pricing and ranking pipeline for trendscore.
//!
//! Turns raw trend signals into scored records: a break-even-aware price
//! ladder, the margin at its lowest tier, and a bounded profit score. Scored
//! records are then merged into the persisted collection by name and ranked.

pub mod error;
pub mod ladder;
pub mod margin;
pub mod pipeline;
pub mod reconcile;
pub mod scorer;
pub mod validate;

pub use error::{InvalidReason, ScoringError};
pub use ladder::price_ladder;
pub use margin::{margin_at, margin_pct, PositivePrice};
pub use pipeline::{run_scoring_pass, score_batch, ScoringReport};
pub use reconcile::{rank, ranking_order, reconcile};
pub use scorer::{profit_score, score_signal, score_signal_at};
pub use validate::{check_signal, validate_batch, Rejection};
