//! Shared domain types for trendscore.
//!
//! Holds the raw and scored trend records, the platform enum, env-driven
//! application config, signal-file ingestion, and the persistence-collaborator
//! trait that storage backends implement.

pub mod app_config;
pub mod config;
pub mod signals;
pub mod store;
pub mod trends;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use signals::{load_signals, parse_signals, SignalsFile};
pub use store::{MemoryTrendStore, StoreError, TrendStore};
pub use trends::{CostBreakdown, Platform, PriceLadder, RawSignal, ScoredTrend};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read signals file {path}: {source}")]
    SignalsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse signals file: {0}")]
    SignalsFileParse(#[from] serde_yaml::Error),
}
