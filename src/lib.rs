//! # feedfinder
//!
//! Discovers RSS, Atom and RDF feeds reachable from a web page.
//!
//! Starting from a seed URL, pages are crawled breadth-first down to a
//! maximum depth. Every fetched page is tokenized once to collect candidate
//! links (`<a href>` and `<link rel="alternate">` with a feed MIME type) and
//! to check whether the page itself is a feed. On the last level only URLs
//! that look like feeds are fetched, and they are only classified.
//!
//! ```text
//! frontier -> fetch -> extract -> resolve -> blacklist -> frontier
//!                         \-> feed? -> results
//! ```
//!
//! ```no_run
//! # async fn run() -> feedfinder::Result<()> {
//! let feeds = feedfinder::find_feeds("https://blog.rust-lang.org/", 1).await?;
//! for feed in feeds {
//!     println!("{feed}");
//! }
//! # Ok(())
//! # }
//! ```

/// Crawl configuration, loadable from TOML.
pub mod config;

/// The crawl engine: [`FeedFinder`](crawl::FeedFinder),
/// [`CrawlSession`](crawl::CrawlSession), [`UrlSet`](crawl::UrlSet) and the
/// blacklist.
pub mod crawl;

/// Error types for crawl setup, fetching and link extraction.
pub mod error;

/// The fetch collaborator and its HTTP implementation.
pub mod fetch;

/// Link extraction and feed classification.
pub mod parse;

pub use config::FinderConfig;
pub use crawl::{CrawlSession, FeedFinder, LevelSummary, UrlSet};
pub use error::{FinderError, Result};

/// Finds feeds reachable from `initial_url` within `max_depth` levels, using
/// the default configuration and an HTTP fetcher.
///
/// Fails only when `initial_url` is blank or `max_depth` is 0, before any
/// request is made.
pub async fn find_feeds(initial_url: &str, max_depth: usize) -> Result<Vec<String>> {
    // Reject bad arguments before an HTTP client is even built
    CrawlSession::new(initial_url, max_depth)?;
    FeedFinder::from_config(&FinderConfig::default())?
        .find_feeds(initial_url, max_depth)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_feeds_validates_before_fetching() {
        assert!(matches!(find_feeds("   ", 1).await, Err(FinderError::BlankUrl)));
        assert!(matches!(
            find_feeds("https://example.com", 0).await,
            Err(FinderError::InvalidDepth(0))
        ));
    }
}
