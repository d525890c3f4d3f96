// src/crawl/finder.rs
// =============================================================================
// FeedFinder wires the collaborators together and runs crawls.
//
// For each URL of a level (see session.rs) it does:
//   hint check (last level only) -> fetch -> extract -> resolve -> blacklist
//
// On the last level links are not extracted: they would sit one level past
// max_depth and never be visited. The page is only classified, with the
// configured final-level sniffer.
// =============================================================================

use std::sync::Arc;

use crate::config::FinderConfig;
use crate::crawl::blacklist::Blacklist;
use crate::crawl::resolve::resolve_links;
use crate::crawl::session::CrawlSession;
use crate::error::Result;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::parse::{sniffer_for, FeedHint, FeedSniffer, LinkExtractor};

// What happened to one URL of a level
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PageOutcome {
    SkippedByHint,
    Failed,
    Page { links: Vec<String>, is_feed: bool },
}

pub struct FeedFinder {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    extractor: LinkExtractor,
    blacklist: Blacklist,
    hint: FeedHint,
    final_level_hint: bool,
    final_sniffer: Box<dyn FeedSniffer>,
    workers: usize,
}

impl FeedFinder {
    pub fn new(config: &FinderConfig, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let hint = FeedHint::new(&config.crawl.feed_hint_pattern)?;

        Ok(Self {
            fetcher,
            extractor: LinkExtractor::new(config.crawl.anchors, hint.clone()),
            blacklist: Blacklist::new(&config.blacklist),
            hint,
            final_level_hint: config.crawl.final_level_hint,
            final_sniffer: sniffer_for(config.crawl.final_level_sniffer),
            workers: config.crawl.workers.max(1),
        })
    }

    /// Builds a finder that fetches over HTTP.
    pub fn from_config(config: &FinderConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config.http)?;
        Self::new(config, Arc::new(fetcher))
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    // Crawls from `initial_url` down to `max_depth` and returns the feed URLs
    // in the order they were confirmed.
    //
    // Only argument validation fails the call; every per-URL problem is
    // logged and skipped, so a crawl where nothing works returns Ok(vec![]).
    pub async fn find_feeds(&self, initial_url: &str, max_depth: usize) -> Result<Vec<String>> {
        let mut session = CrawlSession::new(initial_url, max_depth)?;

        tracing::info!(seed = initial_url.trim(), max_depth, "starting crawl");

        while !session.is_finished() {
            session.advance_level(self).await;
        }

        tracing::info!(
            visited = session.offset(),
            frontier = session.frontier().len(),
            feeds = session.results().len(),
            "crawl finished"
        );

        Ok(session.into_results())
    }

    pub(crate) async fn visit(&self, url: &str, final_level: bool) -> PageOutcome {
        if final_level && self.final_level_hint && !self.hint.matches(url) {
            tracing::debug!(url, "not fetching, does not look like a feed");
            return PageOutcome::SkippedByHint;
        }

        tracing::debug!(url, "fetching");
        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(url, error = %e, "fetch failed, skipping");
                return PageOutcome::Failed;
            }
        };

        if final_level {
            let is_feed = self.final_sniffer.is_feed(&body);
            tracing::debug!(url, sniffer = self.final_sniffer.name(), is_feed, "classified");
            return PageOutcome::Page {
                links: Vec::new(),
                is_feed,
            };
        }

        let extraction = match self.extractor.extract_bytes(&body) {
            Ok(extraction) => extraction,
            Err(e) => {
                tracing::warn!(url, error = %e, "could not parse page, skipping");
                return PageOutcome::Failed;
            }
        };

        let resolved = resolve_links(url, &extraction.links);
        let links = self.blacklist.filter(resolved);

        PageOutcome::Page {
            links,
            is_feed: extraction.is_feed,
        }
    }
}
