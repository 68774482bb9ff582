//! Flickster CLI
//!
//! A command-line client for browsing now playing movies and their trailers.

use clap::Parser;
use flickster::cli::{
    args::{Cli, Commands},
    commands::{details, list, share, trailer},
};
use flickster::models::config;
use flickster::preflight;
use flickster::services::tmdb::{TmdbApi, TmdbClient, TmdbConfig};
use flickster::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = config::load_config();

    // Run preflight checks unless skipped or not needed
    if !cli.skip_preflight && !cli.command.is_offline() {
        run_preflight_checks(&config).await?;
    }

    // Built only when a key is configured; commands that need the network
    // report the missing key themselves.
    let api: Option<Arc<dyn TmdbApi>> = match TmdbConfig::from_config(&config) {
        Ok(tmdb) => Some(Arc::new(TmdbClient::new(tmdb))),
        Err(e) => {
            tracing::debug!("No TMDB client: {}", e);
            None
        }
    };

    // Run the appropriate command
    match cli.command {
        Commands::List {
            orientation,
            format,
            cached,
            refresh,
            policy,
            check_images,
        } => {
            let options = list::ListOptions {
                orientation: orientation.unwrap_or(config.display.orientation),
                format,
                cached,
                refresh,
                policy: policy.unwrap_or(config.display.refresh_policy),
                check_images,
            };
            list::list(api, &config, options).await?;
        }

        Commands::Details { movie_id, check_image } => {
            let api = api.ok_or(Error::ApiKeyMissing)?;
            details::details(api, &config, movie_id, check_image).await?;
        }

        Commands::Trailer { movie_id } => {
            let api = api.ok_or(Error::ApiKeyMissing)?;
            trailer::trailer(api, movie_id).await?;
        }

        Commands::Share { movie_id } => {
            let api = api.ok_or(Error::ApiKeyMissing)?;
            share::share(api, &config, movie_id).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("flickster=debug")
    } else {
        EnvFilter::new("flickster=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &config::Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());

    let results = preflight::run_preflight_checks(config).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
