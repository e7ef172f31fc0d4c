//! # hirematch CLI
//!
//! ```bash
//! hirematch serve                                   # start the HTTP server
//! hirematch search "Java Spring Boot 5 years Pune"  # rank the seeded pool
//! hirematch candidates --json                       # dump the seeded pool
//! ```
//!
//! Every command accepts `--config <FILE>`; without it the built-in
//! defaults apply.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hirematch::config::load_or_default;
use hirematch::logging::init_tracing;
use hirematch::{search, server};

#[derive(Parser)]
#[command(
    name = "hirematch",
    about = "Rank candidate profiles against natural-language hiring requirements",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve,

    /// Rank the seeded candidate pool against a query.
    Search {
        /// Free-text hiring requirement.
        query: String,

        /// Print the full response as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the seeded candidates.
    Candidates {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = load_or_default(cli.config.as_deref())?;
    init_tracing(&cfg.logging.level)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Search { query, json } => {
            search::run_search(&cfg, &query, json).await?;
        }
        Commands::Candidates { json } => {
            search::run_list_candidates(json).await?;
        }
    }

    Ok(())
}
