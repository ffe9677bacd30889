//! # Scheme Desk CLI (`scheme-desk`)
//!
//! Starts the HTTP server, or runs the scheme matcher directly from the
//! command line.
//!
//! ## Usage
//!
//! ```bash
//! scheme-desk --config ./config/scheme-desk.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scheme-desk serve` | Start the HTTP server |
//! | `scheme-desk query "<text>"` | Match text against the catalog |
//! | `scheme-desk schemes` | List the catalog |

mod catalog;
mod config;
mod models;
mod search;
mod server;
mod validation;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG: &str = "./config/scheme-desk.toml";

/// Scheme Desk — match free-text queries against government welfare schemes.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the default file is absent, built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "scheme-desk",
    about = "Scheme Desk — match free-text queries against government welfare schemes",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/scheme-desk.toml`; built-in defaults apply when
    /// that file is absent. A path given explicitly must exist.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    ///
    /// Binds to `[server].bind` (default `127.0.0.1:8000`) and serves
    /// `GET /`, `POST /query-schemes`, `GET /schemes` and `GET /health`.
    Serve,

    /// Match text against the catalog and print the schemes found.
    Query {
        /// Free-text query.
        text: String,

        /// Language of the query. Recorded in the log only.
        #[arg(long, default_value = "en")]
        language: String,

        /// Print the JSON array the HTTP endpoint would return.
        #[arg(long)]
        json: bool,
    },

    /// List every scheme in the catalog, in match order.
    Schemes,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheme_desk=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(Path::new(DEFAULT_CONFIG), true)?,
    };

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Query {
            text,
            language,
            json,
        } => {
            search::run_query(&cfg, &text, &language, json)?;
        }
        Commands::Schemes => {
            catalog::list_schemes(&cfg)?;
        }
    }

    Ok(())
}
