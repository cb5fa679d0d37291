mod rank;
mod score;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "trendscore")]
#[command(about = "Score micro-product trend signals and rank them by profit potential")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Validate, score, and persist a signals file, then print the ranking
    Score {
        /// Signals YAML file; defaults to `TRENDSCORE_SIGNALS_PATH`
        #[arg(long)]
        signals: Option<PathBuf>,

        /// Score against an empty in-memory store without touching the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the stored ranking
    Rank {
        /// Maximum number of trends to show
        #[arg(long, default_value_t = 20)]
        limit: u32,

        /// Render as a markdown report instead of a table
        #[arg(long)]
        markdown: bool,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = trendscore_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => {
            let pool = trendscore_db::connect_pool_from_app_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    trendscore_db::health_check(&pool).await?;
                    println!("database is reachable");
                }
                DbCommands::Migrate => {
                    let applied = trendscore_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Some(Commands::Score { signals, dry_run }) => {
            let path = signals.unwrap_or_else(|| config.signals_path.clone());
            score::run_score(&config, &path, dry_run).await?;
        }
        Some(Commands::Rank { limit, markdown }) => {
            let pool = trendscore_db::connect_pool_from_app_config(&config).await?;
            rank::run_rank(&pool, limit, markdown).await?;
        }
        None => println!("trendscore: run with --help to list commands"),
    }

    Ok(())
}
