// src/crawl/url_set.rs
// =============================================================================
// An insertion-ordered set of URL strings.
//
// The crawl frontier and the list of discovered feeds are both UrlSets.
// Order matters for both: it is the traversal order of the next depth level
// and the order feeds are reported in.
//
// Layout:
// - urls:  Vec<String>, the ordered sequence
// - index: HashSet<String>, O(1) membership test
//
// There is no remove. A set only grows for the lifetime of one crawl.
// =============================================================================

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct UrlSet {
    urls: Vec<String>,
    index: HashSet<String>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set pre-seeded with `urls`, dropping repeats.
    pub fn with_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        set.put_all(urls);
        set
    }

    /// Appends `url` unless it is already present.
    ///
    /// Returns true if the URL was new.
    pub fn put(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.index.contains(&url) {
            return false;
        }
        self.index.insert(url.clone());
        self.urls.push(url);
        true
    }

    /// Appends every new URL in argument order. Returns how many were new.
    pub fn put_all<I, S>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for url in urls {
            if self.put(url) {
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains(url)
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.urls.get(position).map(String::as_str)
    }

    /// URLs in `[from, to)`, clamped to the current length.
    pub fn slice(&self, from: usize, to: usize) -> &[String] {
        let to = to.min(self.urls.len());
        let from = from.min(to);
        &self.urls[from..to]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_keeps_first_position() {
        let mut set = UrlSet::new();
        assert!(set.put("https://a.example/"));
        assert!(set.put("https://b.example/"));
        assert!(!set.put("https://a.example/"));
        assert!(set.put("https://c.example/"));

        assert_eq!(
            set.as_slice(),
            ["https://a.example/", "https://b.example/", "https://c.example/"]
        );
    }

    #[test]
    fn test_put_all_preserves_argument_order() {
        let mut set = UrlSet::with_urls(["x"]);
        let added = set.put_all(["c", "a", "x", "b", "a"]);

        assert_eq!(added, 3);
        assert_eq!(set.as_slice(), ["x", "c", "a", "b"]);
    }

    #[test]
    fn test_no_duplicates_after_many_puts() {
        let mut set = UrlSet::new();
        for round in 0..5 {
            for i in 0..20 {
                set.put(format!("https://example.com/{}", (i * 7 + round) % 13));
            }
        }

        assert_eq!(set.len(), 13);
        let unique: HashSet<_> = set.iter().collect();
        assert_eq!(unique.len(), set.len());
    }

    #[test]
    fn test_slice_is_clamped() {
        let set = UrlSet::with_urls(["a", "b", "c"]);

        assert_eq!(set.slice(1, 3), ["b", "c"]);
        assert_eq!(set.slice(1, 10), ["b", "c"]);
        assert!(set.slice(3, 3).is_empty());
        assert!(set.slice(5, 2).is_empty());
    }

    #[test]
    fn test_membership() {
        let set = UrlSet::with_urls(["https://example.com/feed"]);

        assert!(set.contains("https://example.com/feed"));
        assert!(!set.contains("https://example.com/feed/"));
        assert_eq!(set.get(0), Some("https://example.com/feed"));
        assert_eq!(set.get(1), None);
        assert!(!set.is_empty());
    }
}
