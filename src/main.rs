// src/main.rs
// =============================================================================
// This is the entry point of the feedfinder CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout only carries results)
// 3. Load the config file, if any, and apply flag overrides
// 4. Run the crawl and print the feeds
// 5. Exit with proper code (0 = success, 2 = error)
//
// Finding no feeds is a success with empty output, not an error.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use feedfinder::{FeedFinder, FinderConfig};

// Shape of the --json output
#[derive(Debug, Serialize)]
struct FeedReport<'a> {
    seed: &'a str,
    max_depth: usize,
    feeds: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => FinderConfig::load(path)?,
        None => FinderConfig::default(),
    };
    cli.apply_overrides(&mut config);

    let finder = FeedFinder::from_config(&config).context("could not set up the crawler")?;

    let feeds = finder
        .find_feeds(&cli.url, cli.depth)
        .await
        .with_context(|| format!("cannot search feeds from '{}'", cli.url))?;

    print_feeds(&cli, feeds)
}

fn print_feeds(cli: &Cli, feeds: Vec<String>) -> Result<()> {
    if cli.json {
        let report = FeedReport {
            seed: cli.url.trim(),
            max_depth: cli.depth,
            feeds,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for feed in feeds {
            println!("{}", feed);
        }
    }
    Ok(())
}
