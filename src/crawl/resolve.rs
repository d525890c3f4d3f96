// src/crawl/resolve.rs
// =============================================================================
// Turns candidate links (absolute or relative) into absolute URLs.
//
// Resolution follows the usual browser rules via Url::join:
//   base = "https://example.com/blog/post"
//   "../feed.xml"      -> "https://example.com/feed.xml"
//   "/rss"             -> "https://example.com/rss"
//   "https://x.org/a"  -> "https://x.org/a"
//
// The fragment is dropped, so "#comments" on a page resolves back to the
// page itself and the frontier dedups it.
// =============================================================================

use url::Url;

pub fn resolve_link(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    let mut url = base.join(href)?;
    url.set_fragment(None);
    Ok(url)
}

// Resolves every link against `page_url`. Links that fail to resolve are
// logged and dropped; if the page URL itself is unparseable nothing resolves.
pub fn resolve_links(page_url: &str, links: &[String]) -> Vec<String> {
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(url = page_url, error = %e, "cannot resolve links against invalid page URL");
            return Vec::new();
        }
    };

    links
        .iter()
        .filter_map(|href| match resolve_link(&base, href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                tracing::warn!(base = page_url, link = %href, error = %e, "dropping unresolvable link");
                None
            }
        })
        .collect()
}
