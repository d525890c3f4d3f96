// src/crawl/session.rs
// =============================================================================
// This module holds the state of one breadth-first crawl.
//
// How it works:
// 1. The frontier starts with just the seed URL
// 2. A level is every frontier URL between `offset` and the frontier length
//    at the moment the level starts
// 3. Each URL in the level is visited (fetch, extract, resolve, blacklist)
//    and the surviving links are appended to the frontier
// 4. Pages whose content is a feed go into `results`
// 5. `offset` jumps to the end of the level, `depth` goes up by one
// 6. Repeat until depth passes max_depth or a level adds nothing new
//
// Links found while processing level N land after the level's end, so they
// are only ever visited as part of level N + 1.
//
// Rust concepts:
// - Explicit state struct instead of locals in a loop, so a single level can
//   be driven and inspected from tests
// - futures::StreamExt::buffered: bounded concurrency, results in input order
// =============================================================================

use futures::stream::{self, StreamExt};

use crate::crawl::finder::{FeedFinder, PageOutcome};
use crate::crawl::UrlSet;
use crate::error::{FinderError, Result};

// Counters for one processed level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelSummary {
    pub depth: usize,
    /// URLs that belonged to this level
    pub scheduled: usize,
    pub fetched: usize,
    /// Final level only: URLs not fetched because they don't look like feeds
    pub skipped_by_hint: usize,
    pub failed: usize,
    /// New URLs appended to the frontier
    pub discovered: usize,
    /// New URLs appended to the results
    pub feeds: usize,
}

#[derive(Debug, Clone)]
pub struct CrawlSession {
    frontier: UrlSet,
    results: UrlSet,
    depth: usize,
    offset: usize,
    max_depth: usize,
}

impl CrawlSession {
    // Validates the arguments and seeds the frontier
    //
    // Errors:
    //   BlankUrl      - initial_url is empty after trimming
    //   InvalidDepth  - max_depth is 0
    pub fn new(initial_url: &str, max_depth: usize) -> Result<Self> {
        let seed = initial_url.trim();
        if seed.is_empty() {
            return Err(FinderError::BlankUrl);
        }
        if max_depth < 1 {
            return Err(FinderError::InvalidDepth(max_depth));
        }

        Ok(Self {
            frontier: UrlSet::with_urls([seed]),
            results: UrlSet::new(),
            depth: 0,
            offset: 0,
            max_depth,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn frontier(&self) -> &UrlSet {
        &self.frontier
    }

    pub fn results(&self) -> &UrlSet {
        &self.results
    }

    /// The level about to be processed is the last one allowed.
    pub fn is_final_level(&self) -> bool {
        self.depth == self.max_depth
    }

    /// Depth bound exhausted, or the last level added no new URLs.
    pub fn is_finished(&self) -> bool {
        self.depth > self.max_depth || self.offset >= self.frontier.len()
    }

    // Visits every URL of the current level and moves on to the next one.
    //
    // Per-URL failures are logged by the finder and counted here; they never
    // stop the level. Calling this on a finished session is a no-op that
    // returns an empty summary.
    pub async fn advance_level(&mut self, finder: &FeedFinder) -> LevelSummary {
        if self.is_finished() {
            return LevelSummary {
                depth: self.depth,
                ..LevelSummary::default()
            };
        }

        let level_end = self.frontier.len();
        let final_level = self.is_final_level();
        let level: Vec<String> = self.frontier.slice(self.offset, level_end).to_vec();

        let mut summary = LevelSummary {
            depth: self.depth,
            scheduled: level.len(),
            ..LevelSummary::default()
        };

        tracing::debug!(
            depth = self.depth,
            urls = level.len(),
            final_level,
            "starting level"
        );

        // Fetches may overlap, but outcomes arrive in frontier order and are
        // applied here one at a time
        let mut outcomes = stream::iter(level.into_iter().map(|url| async move {
            let outcome = finder.visit(&url, final_level).await;
            (url, outcome)
        }))
        .buffered(finder.workers());

        while let Some((url, outcome)) = outcomes.next().await {
            match outcome {
                PageOutcome::SkippedByHint => summary.skipped_by_hint += 1,
                PageOutcome::Failed => summary.failed += 1,
                PageOutcome::Page { links, is_feed } => {
                    summary.fetched += 1;
                    summary.discovered += self.frontier.put_all(links);
                    if is_feed && self.results.put(url.as_str()) {
                        tracing::info!(url = %url, depth = self.depth, "found feed");
                        summary.feeds += 1;
                    }
                }
            }
        }

        self.offset = level_end;
        self.depth += 1;

        tracing::info!(
            depth = summary.depth,
            scheduled = summary.scheduled,
            fetched = summary.fetched,
            skipped = summary.skipped_by_hint,
            failed = summary.failed,
            discovered = summary.discovered,
            feeds = summary.feeds,
            "level complete"
        );

        summary
    }

    pub fn into_results(self) -> Vec<String> {
        self.results.into_vec()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a snapshot of the level instead of a queue?
//    - The frontier never shrinks, so "visited" is simply "index < offset"
//    - The level is frontier[offset..level_end]; anything appended while the
//      level runs has an index >= level_end
//
// 2. What does .buffered(n) do?
//    - Polls up to n futures at once
//    - Yields their outputs in the order the futures were created, not the
//      order they finish, so results keep frontier order for any n
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FinderConfig;
    use crate::fetch::stub::StubFetcher;
    use std::sync::Arc;

    const SEED: &str = "https://example.com/";

    fn finder(fetcher: &Arc<StubFetcher>) -> FeedFinder {
        FeedFinder::new(&FinderConfig::default(), fetcher.clone()).unwrap()
    }

    #[test]
    fn test_new_rejects_blank_url() {
        assert!(matches!(CrawlSession::new("", 2), Err(FinderError::BlankUrl)));
        assert!(matches!(CrawlSession::new(" \t\n", 2), Err(FinderError::BlankUrl)));
    }

    #[test]
    fn test_new_rejects_zero_depth() {
        assert!(matches!(
            CrawlSession::new("http://x", 0),
            Err(FinderError::InvalidDepth(0))
        ));
    }

    #[test]
    fn test_new_seeds_trimmed_url() {
        let session = CrawlSession::new("  https://example.com/  ", 1).unwrap();

        assert_eq!(session.frontier().as_slice(), ["https://example.com/"]);
        assert!(session.results().is_empty());
        assert_eq!((session.depth(), session.offset()), (0, 0));
        assert!(!session.is_finished());
        assert!(!session.is_final_level());
    }

    #[tokio::test]
    async fn test_advance_one_level() {
        let fetcher = Arc::new(StubFetcher::new().page(
            SEED,
            r#"<a href="/about">About</a><a href="/blog/">Blog</a><a href="/about">Again</a>"#,
        ));
        let finder = finder(&fetcher);
        let mut session = CrawlSession::new(SEED, 3).unwrap();

        let summary = session.advance_level(&finder).await;

        assert_eq!(
            summary,
            LevelSummary {
                depth: 0,
                scheduled: 1,
                fetched: 1,
                discovered: 2,
                ..LevelSummary::default()
            }
        );
        assert_eq!(
            session.frontier().as_slice(),
            [SEED, "https://example.com/about", "https://example.com/blog/"]
        );
        assert_eq!(session.offset(), 1);
        assert_eq!(session.depth(), 1);
        assert_eq!(fetcher.requests(), vec![SEED]);
    }

    #[tokio::test]
    async fn test_frontier_is_monotonic_and_offset_bounded() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .page(SEED, r#"<a href="/a">a</a><a href="/b">b</a>"#)
                .page("https://example.com/a", r#"<a href="/">home</a><a href="/c">c</a>"#)
                .page("https://example.com/b", r#"<a href="/a">a</a>"#)
                .page("https://example.com/c", r#"<a href="/d">d</a>"#),
        );
        let finder = finder(&fetcher);
        let mut session = CrawlSession::new(SEED, 4).unwrap();

        let mut last_len = session.frontier().len();
        let mut last_offset = session.offset();
        while !session.is_finished() {
            session.advance_level(&finder).await;

            assert!(session.frontier().len() >= last_len);
            assert!(session.offset() >= last_offset);
            assert!(session.offset() <= session.frontier().len());
            last_len = session.frontier().len();
            last_offset = session.offset();
        }

        assert_eq!(
            session.frontier().as_slice(),
            [
                SEED,
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
                "https://example.com/d",
            ]
        );
    }

    #[tokio::test]
    async fn test_links_from_a_level_wait_for_the_next_level() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .page(SEED, r#"<a href="/one">1</a><a href="/two">2</a>"#)
                .page("https://example.com/one", r#"<a href="/three">3</a>"#)
                .page("https://example.com/two", "<p>nothing</p>")
                .page("https://example.com/three", "<p>leaf</p>"),
        );
        let finder = finder(&fetcher);
        let mut session = CrawlSession::new(SEED, 3).unwrap();

        session.advance_level(&finder).await;
        session.advance_level(&finder).await;

        // /three was discovered during level 1 but not visited in it
        assert_eq!(
            fetcher.requests(),
            vec![SEED, "https://example.com/one", "https://example.com/two"]
        );
        assert!(session.frontier().contains("https://example.com/three"));
        assert_eq!(session.offset(), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_counted_and_skipped() {
        let fetcher = Arc::new(StubFetcher::new());
        let finder = finder(&fetcher);
        let mut session = CrawlSession::new(SEED, 2).unwrap();

        let summary = session.advance_level(&finder).await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.fetched, 0);
        assert!(session.is_finished());
    }

    #[tokio::test]
    async fn test_advance_on_finished_session_is_noop() {
        let fetcher = Arc::new(StubFetcher::new().page(SEED, "<p>no links</p>"));
        let finder = finder(&fetcher);
        let mut session = CrawlSession::new(SEED, 5).unwrap();

        session.advance_level(&finder).await;
        assert!(session.is_finished());

        let summary = session.advance_level(&finder).await;
        assert_eq!(summary.scheduled, 0);
        assert_eq!(fetcher.requests().len(), 1);
    }
}
