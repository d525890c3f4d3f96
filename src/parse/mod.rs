// src/parse/mod.rs
// =============================================================================
// Everything that looks inside a fetched body.
//
// Submodules:
// - links: candidate link extraction + root-tag feed signal, one pass
// - sniff: the two feed classification strategies
// - hint:  the "URL looks like a feed" pattern
// =============================================================================

pub mod hint;
pub mod links;
pub mod sniff;

pub use hint::FeedHint;
pub use links::{Extraction, LinkExtractor, FEED_LINK_TYPES};
pub use sniff::{is_feed_root_name, sniffer_for, FeedSniffer, RootTagSniffer, XmlRootSniffer};
