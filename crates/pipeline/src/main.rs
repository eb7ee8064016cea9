//! IGDB feature pipeline
//!
//! Provides:
//! - Raw ingestion of one release year from the IGDB API
//! - Feature Table construction into the silver collection
//! - On-demand features for a single game

mod age_ratings;
mod auth;
mod catalog;
mod config;
mod db;
mod error;
mod igdb;
mod paginate;
mod stages;
#[cfg(test)]
mod testing;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::igdb::IgdbClient;
use crate::paginate::FetchOptions;

#[derive(Parser)]
#[command(name = "igdb-features", version, about = "Build game feature tables from IGDB")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch one release year into the raw collections
    Ingest {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Build the Feature Table for a stored year
    Featurize {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Print the Feature Table of one game as JSON
    Game { id: u64 },
    /// Ingest then featurize
    Run {
        #[arg(long)]
        year: Option<i32>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "igdb_features=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    if let Err(e) = run(cli.command, &config) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Command, config: &Config) -> Result<()> {
    if !config.has_credentials() {
        return Err(PipelineError::Config(
            "TWITCH_ID and TWITCH_SECRET must be set".to_string(),
        ));
    }

    let mut client = IgdbClient::new(config)?;
    let options = FetchOptions::from_config(config);

    match command {
        Command::Ingest { year } => {
            let conn = db::open_connection(&config.database_path())?;
            stages::ingest(&mut client, &conn, config, year.unwrap_or(config.year))?;
        }
        Command::Featurize { year } => {
            let conn = db::open_connection(&config.database_path())?;
            let catalog = catalog::load_catalog(&mut client, options)?;
            stages::featurize(&mut client, &conn, config, &catalog, year.unwrap_or(config.year))?;
        }
        Command::Game { id } => {
            let catalog = catalog::load_catalog(&mut client, options)?;
            let table = stages::featurize_game(&mut client, config, &catalog, id)?;
            println!("{}", serde_json::to_string_pretty(&table.to_documents()?)?);
        }
        Command::Run { year } => {
            let year = year.unwrap_or(config.year);
            let conn = db::open_connection(&config.database_path())?;
            stages::ingest(&mut client, &conn, config, year)?;
            let catalog = catalog::load_catalog(&mut client, options)?;
            stages::featurize(&mut client, &conn, config, &catalog, year)?;
        }
    }

    Ok(())
}
