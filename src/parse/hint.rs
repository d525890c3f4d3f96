// src/parse/hint.rs
// =============================================================================
// Lexical "this URL looks like a feed" test.
//
// Used in two places:
// - the crawler's last depth level, to decide which URLs are worth a fetch
// - the link extractor, when anchors are restricted to feed-looking hrefs
// =============================================================================

use regex::{Regex, RegexBuilder};

use crate::config::DEFAULT_FEED_HINT_PATTERN;

#[derive(Debug, Clone)]
pub struct FeedHint {
    pattern: Regex,
}

impl FeedHint {
    /// Compiles `pattern` as a case-insensitive regex.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}

impl Default for FeedHint {
    fn default() -> Self {
        // Constant pattern, covered by test_default_pattern_compiles
        Self::new(DEFAULT_FEED_HINT_PATTERN).expect("default feed hint pattern compiles")
    }
}
