// src/parse/sniff.rs
// =============================================================================
// Deciding whether fetched content is itself a feed.
//
// A feed is recognized by its root element: rss, feed (Atom) or rdf (RSS 1.0,
// usually written <rdf:RDF>). Two strategies, same answer for real feeds:
//
// - RootTagSniffer: HTML tokenizer, stop at the first start tag. Forgiving
//   with broken markup, same rules the link extractor applies.
// - XmlRootSniffer: XML pull parser, decode only the root element name.
//   Cheaper, meant for URLs we already expect to be feeds.
//
// Both fail closed: anything unexpected means "not a feed", never an error.
// =============================================================================

use lol_html::{element, HtmlRewriter, OutputSink, Settings};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::config::SnifferKind;

const FEED_ROOT_NAMES: [&str; 3] = ["rss", "feed", "rdf"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// True when `name` (a tag name, possibly namespace-prefixed) is a feed root.
pub fn is_feed_root_name(name: &str) -> bool {
    let local = name.rsplit(':').next().unwrap_or(name);
    FEED_ROOT_NAMES.iter().any(|root| local.eq_ignore_ascii_case(root))
}

/// A strategy that looks at a body and says whether it is a feed document.
pub trait FeedSniffer: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_feed(&self, body: &[u8]) -> bool;
}

pub fn sniffer_for(kind: SnifferKind) -> Box<dyn FeedSniffer> {
    match kind {
        SnifferKind::XmlRoot => Box::new(XmlRootSniffer),
        SnifferKind::RootTag => Box::new(RootTagSniffer),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RootTagSniffer;

impl FeedSniffer for RootTagSniffer {
    fn name(&self) -> &'static str {
        "root-tag"
    }

    fn is_feed(&self, body: &[u8]) -> bool {
        let mut root: Option<String> = None;

        {
            let mut rewriter = HtmlRewriter::new(
                Settings {
                    element_content_handlers: vec![element!("*", |el| {
                        root = Some(el.tag_name());
                        // Abort tokenizing, nothing after the root matters
                        Err("root tag found".into())
                    })],
                    ..Settings::default()
                },
                NoopSink,
            );

            // The abort above surfaces as a write error; root is what counts
            if rewriter.write(body).is_ok() {
                let _ = rewriter.end();
            }
        }

        root.as_deref().is_some_and(is_feed_root_name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRootSniffer;

impl FeedSniffer for XmlRootSniffer {
    fn name(&self) -> &'static str {
        "xml-root"
    }

    fn is_feed(&self, body: &[u8]) -> bool {
        let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
        let mut reader = Reader::from_reader(body);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    let local = e.local_name();
                    return is_feed_root_name(&String::from_utf8_lossy(local.as_ref()));
                }
                Ok(Event::Eof) => return false,
                // Declaration, comments, doctype, processing instructions, whitespace
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!(error = %e, "body is not well-formed XML before its root");
                    return false;
                }
            }
        }
    }
}

// Output sink for rewriters we only use as tokenizers
pub(crate) struct NoopSink;

impl OutputSink for NoopSink {
    fn handle_chunk(&mut self, _chunk: &[u8]) {}
}
