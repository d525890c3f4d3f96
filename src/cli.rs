// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// One command, all flags:
//   feedfinder --url https://example.com --depth 2
//   feedfinder --url https://example.com --depth 1 --json --workers 8
//
// Flags that also exist in the config file (--workers, --no-final-hint)
// override the file when given.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use feedfinder::FinderConfig;

#[derive(Parser, Debug)]
#[command(
    name = "feedfinder",
    version,
    about = "Discover RSS, Atom and RDF feeds reachable from a web page",
    long_about = "feedfinder crawls a web page and the pages it links to, breadth-first, \
                  and prints every URL whose content is a feed."
)]
pub struct Cli {
    /// Page to start crawling from (e.g., https://example.com)
    #[arg(short, long)]
    pub url: String,

    /// Maximum crawl depth, at least 1
    ///
    /// Depth 1 = the starting page plus the feed-looking links on it
    /// Depth 2 = ... plus every page it links to, and their feed-looking links
    #[arg(short, long, default_value_t = 1)]
    pub depth: usize,

    /// Output results as JSON instead of one URL per line
    #[arg(long)]
    pub json: bool,

    /// TOML config file (timeouts, blacklist, crawl policy)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Concurrent fetches within one depth level
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Fetch every URL on the last level, not only the feed-looking ones
    #[arg(long)]
    pub no_final_hint: bool,

    /// More logging on stderr (-v info, -vv debug); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    // Applies command-line overrides on top of a loaded config
    pub fn apply_overrides(&self, config: &mut FinderConfig) {
        if let Some(workers) = self.workers {
            config.crawl.workers = workers;
        }
        if self.no_final_hint {
            config.crawl.final_level_hint = false;
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
