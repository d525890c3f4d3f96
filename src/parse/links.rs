// src/parse/links.rs
// =============================================================================
// This module extracts candidate feed links from fetched pages.
//
// We use the `lol_html` crate which:
// - Tokenizes HTML as a stream, so we can feed it the body chunk by chunk
// - Calls our handler for every start tag, in document order
// - Steps through broken markup instead of failing on it
//
// A DOM parser would not work here: it wraps an <rss> document inside
// <html><body>, and we need to know what the very first tag was.
//
// What counts as a candidate:
// - <a href="...">                                 (see AnchorPolicy)
// - <link rel="alternate" type="<feed type>" href="...">
//
// Rust concepts:
// - Closures capturing local state by &mut
// - std::io::Read: any byte source can be parsed
// =============================================================================

use std::io::{ErrorKind, Read};

use lol_html::html_content::Element;
use lol_html::{element, HtmlRewriter, Settings};

use crate::config::AnchorPolicy;
use crate::crawl::UrlSet;
use crate::error::ExtractError;
use crate::parse::hint::FeedHint;
use crate::parse::sniff::{is_feed_root_name, NoopSink};

// MIME types that mark a <link rel="alternate"> as a feed
pub const FEED_LINK_TYPES: [&str; 5] = [
    "application/atom+xml",
    "application/rss+xml",
    "application/x-atom+xml",
    "application/x.atom+xml",
    "text/xml",
];

const CHUNK_SIZE: usize = 8 * 1024;

// The result of parsing one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Candidate links in document order, without repeats
    pub links: Vec<String>,
    /// The first tag of the document was rss, feed or rdf
    pub is_feed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LinkExtractor {
    anchors: AnchorPolicy,
    hint: FeedHint,
}

impl LinkExtractor {
    pub fn new(anchors: AnchorPolicy, hint: FeedHint) -> Self {
        Self { anchors, hint }
    }

    // Parses `reader` to the end and returns its candidate links plus the
    // feed signal.
    //
    // Errors only on a failed read or a tokenizer failure. Malformed markup
    // is not an error.
    pub fn extract<R: Read>(&self, mut reader: R) -> Result<Extraction, ExtractError> {
        let mut collector = LinkCollector::new(self);

        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!("*", |el| {
                    collector.visit(el);
                    Ok(())
                })],
                ..Settings::default()
            },
            NoopSink,
        );

        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ExtractError::Read(e)),
            };
            rewriter.write(&buf[..n])?;
        }
        rewriter.end()?;

        Ok(collector.finish())
    }

    pub fn extract_bytes(&self, body: &[u8]) -> Result<Extraction, ExtractError> {
        self.extract(body)
    }
}

// Per-parse state driven by the tokenizer callback
struct LinkCollector<'a> {
    extractor: &'a LinkExtractor,
    links: UrlSet,
    tags_seen: usize,
    is_feed: bool,
}

impl<'a> LinkCollector<'a> {
    fn new(extractor: &'a LinkExtractor) -> Self {
        Self {
            extractor,
            links: UrlSet::new(),
            tags_seen: 0,
            is_feed: false,
        }
    }

    fn visit(&mut self, el: &Element<'_, '_>) {
        let tag_name = el.tag_name().to_ascii_lowercase();

        // Only the root decides; nested <feed> or <rss> tags don't count
        if self.tags_seen == 0 && is_feed_root_name(&tag_name) {
            self.is_feed = true;
        }
        self.tags_seen += 1;

        let candidate = match tag_name.as_str() {
            "a" => self.anchor_href(el),
            "link" => feed_link_href(el),
            _ => None,
        };

        if let Some(href) = candidate {
            self.links.put(href);
        }
    }

    fn anchor_href(&self, el: &Element<'_, '_>) -> Option<String> {
        let href = normalized_attribute(el, "href")?;
        match self.extractor.anchors {
            AnchorPolicy::All => Some(href),
            AnchorPolicy::FeedHint if self.extractor.hint.matches(&href) => Some(href),
            AnchorPolicy::FeedHint => None,
        }
    }

    fn finish(self) -> Extraction {
        Extraction {
            links: self.links.into_vec(),
            is_feed: self.is_feed,
        }
    }
}

// <link rel="alternate" type="application/rss+xml" href="...">
fn feed_link_href(el: &Element<'_, '_>) -> Option<String> {
    let rel = normalized_attribute(el, "rel")?;
    let link_type = normalized_attribute(el, "type")?;
    let href = normalized_attribute(el, "href")?;

    if rel != "alternate" || !FEED_LINK_TYPES.contains(&link_type.as_str()) {
        return None;
    }
    Some(href)
}

// Attribute value with entities decoded, trimmed and lower-cased.
// Present-but-blank is treated as missing.
fn normalized_attribute(el: &Element<'_, '_>, name: &str) -> Option<String> {
    let raw = el.get_attribute(name)?;
    let value = normalize_attribute_value(&raw);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn normalize_attribute_value(raw: &str) -> String {
    html_escape::decode_html_entities(raw).trim().to_lowercase()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is the href lower-cased?
//    - Attribute values are normalized the same way before comparing and
//      before storing, so "/Feed.XML" becomes "/feed.xml"
//    - Servers with case-sensitive paths may then answer 404, which is a
//      normal per-URL fetch failure
//
// 2. What does element!("*", ...) give us?
//    - A handler that runs for every start tag (self-closing included)
//    - End tags, comments, doctypes and <?xml ...?> never reach it
// -----------------------------------------------------------------------------
