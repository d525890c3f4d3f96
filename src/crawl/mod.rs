// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Features:
// - Breadth-first crawling, one depth level at a time
// - Insertion-ordered dedup of every URL seen (UrlSet)
// - Relative link resolution and blacklist filtering before enqueueing
// - Cheap URL-shape filter on the last level, where links are no longer
//   followed and only pages that already look like feeds are fetched
// =============================================================================

mod blacklist;
mod finder;
mod resolve;
mod session;
mod url_set;

pub use blacklist::Blacklist;
pub use finder::FeedFinder;
pub use resolve::{resolve_link, resolve_links};
pub use session::{CrawlSession, LevelSummary};
pub use url_set::UrlSet;
