//! Rickdex CLI
//!
//! Command-line front end for the character search form.
//!
//! # Usage
//!
//! ```bash
//! rickdex search --email rick@c137.com --status alive --accept
//! rickdex search --email rick@c137.com --species Human --min-episodes 20 --accept --format json
//! rickdex options
//! rickdex config set api_url http://localhost:8080/api/character
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "rickdex")]
#[command(author = "Rickdex")]
#[command(version)]
#[command(about = "Search characters with a validated form", long_about = None)]
struct Cli {
    /// Character endpoint URL
    #[arg(long, env = "RICKDEX_API_URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the form and search
    Search(SearchArgs),
    /// List species and status choices
    Options,
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct SearchArgs {
    /// Contact email (required)
    #[arg(long, default_value = "")]
    pub email: String,
    /// Character name to filter by
    #[arg(long, default_value = "")]
    pub name: String,
    /// Species, e.g. "Human" or "Mythological Creature"
    #[arg(long, default_value = "")]
    pub species: String,
    /// alive, dead or unknown
    #[arg(long, default_value = "")]
    pub status: String,
    /// Only keep characters seen in at least this many episodes
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub min_episodes: String,
    /// Accept the terms
    #[arg(long)]
    pub accept: bool,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Could not read config, using defaults: {}", e);
        config::Config::default()
    });
    let finder = config.finder_config(cli.api_url);
    let format = cli.format.or(config.format()).unwrap_or(output::OutputFormat::Table);

    let result = match cli.command {
        Commands::Search(args) => commands::search::handle(args, &finder, format).await,
        Commands::Options => commands::options::handle(format),
        Commands::Config { action } => commands::config::handle(action, cli.profile.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
