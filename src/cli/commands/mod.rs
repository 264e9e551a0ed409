//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod lookup;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kinolink::config::{LoadOptions, Settings};
use kinolink::engine::FilmQuery;
use kinolink::http_client::HttpClient;

#[derive(Parser)]
#[command(name = "kinolink")]
#[command(about = "Find a film and where to watch it")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the film and links as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Look a film up by name and find watch links
    Search {
        /// Film title (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Pick a random well-rated film and find watch links
    Random,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(LoadOptions {
        config_path: cli.config,
    })
    .await?;
    settings.validate()?;

    let mut builder = HttpClient::builder();
    if let Some(ref ua) = settings.user_agent {
        builder = builder.user_agent(ua);
    }
    let client = builder.build()?;

    let query = match cli.command {
        Commands::Search { query } => FilmQuery::ByName(query.join(" ")),
        Commands::Random => FilmQuery::Random,
    };

    let result = lookup::cmd_lookup(&settings, client.clone(), &query, cli.json).await;

    client.shutdown();
    result
}
