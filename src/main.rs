//! # Tablesift CLI (`sift`)
//!
//! ## Usage
//!
//! ```bash
//! sift --config ./config/sift.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `sift sources` | List configured databases and their health |
//! | `sift search "<query>"` | Run one query and print ranked results |
//! | `sift shell` | Load once, then answer one query per stdin line |
//!
//! ## Examples
//!
//! ```bash
//! sift search "john marketing"
//! sift search "john marketing" --strategy rows --limit 10
//! echo "jane doe" | sift search - --json
//! ```
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=info` or
//! `RUST_LOG=tablesift=debug` for more detail.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use tablesift::config;
use tablesift::core::strategy::StrategyKind;
use tablesift::search::{self, SearchOptions};
use tablesift::{shell, sources};

/// Tablesift: fuzzy record search across SQLite databases.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/sift.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "sift",
    about = "Fuzzy record search across the tables of several SQLite databases",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/sift.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Matching overrides shared by `search` and `shell`.
#[derive(clap::Args, Debug, Clone)]
struct MatchArgs {
    /// Matching strategy: `grouped` (one result per table) or `rows`
    /// (one result per record, all keywords required).
    #[arg(long)]
    strategy: Option<StrategyKind>,

    /// Character n-gram length used for similarity.
    #[arg(long = "ngram")]
    ngram_size: Option<usize>,

    /// Maximum number of results to print.
    #[arg(long)]
    limit: Option<usize>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,
}

impl From<MatchArgs> for SearchOptions {
    fn from(args: MatchArgs) -> Self {
        SearchOptions {
            strategy: args.strategy,
            ngram_size: args.ngram_size,
            limit: args.limit,
            json: args.json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List configured databases and whether they can be read.
    Sources,

    /// Search every configured table for a query.
    Search {
        /// The query text, or `-` to read it from stdin.
        query: String,

        #[command(flatten)]
        args: MatchArgs,
    },

    /// Interactive session: one query per line until EOF or `:quit`.
    Shell {
        #[command(flatten)]
        args: MatchArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Sources => {
            sources::list_sources(&cfg).await?;
        }
        Commands::Search { query, args } => {
            let query = if query == "-" {
                let mut buf = String::new();
                tokio::io::stdin().read_to_string(&mut buf).await?;
                buf.trim().to_string()
            } else {
                query
            };
            search::run_search(&cfg, &query, &args.into()).await?;
        }
        Commands::Shell { args } => {
            shell::run_shell(&cfg, &args.into()).await?;
        }
    }

    Ok(())
}
