// src/crawl/blacklist.rs
// =============================================================================
// Drops links we never want in the frontier.
//
// Two kinds of rules, both from BlacklistConfig:
// - URL prefixes ("javascript:", "mailto:", ...) checked on the lower-cased URL
// - host suffixes (".facebook.com", ...) checked against "." + host
//
// A URL that cannot be parsed is kept. Only the prefix rules can apply to it.
// =============================================================================

use url::Url;

use crate::config::BlacklistConfig;

#[derive(Debug, Clone)]
pub struct Blacklist {
    hosts: Vec<String>,
    url_prefixes: Vec<String>,
}

impl Blacklist {
    pub fn new(config: &BlacklistConfig) -> Self {
        Self {
            hosts: config.hosts.iter().map(|h| h.to_lowercase()).collect(),
            url_prefixes: config.url_prefixes.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    // Returns the URLs that pass every rule, in their original order and
    // original casing
    pub fn filter(&self, urls: Vec<String>) -> Vec<String> {
        urls.into_iter().filter(|url| self.allows(url)).collect()
    }

    pub fn allows(&self, url: &str) -> bool {
        let lower = url.to_lowercase();

        if self.url_prefixes.iter().any(|p| lower.starts_with(p.as_str())) {
            return false;
        }

        // Fail open: unparseable URLs and URLs without a host stay
        let host = match Url::parse(&lower) {
            Ok(parsed) => match parsed.host_str() {
                Some(host) => format!(".{}", host),
                None => return true,
            },
            Err(_) => return true,
        };

        !self.hosts.iter().any(|suffix| host.ends_with(suffix.as_str()))
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::new(&BlacklistConfig::default())
    }
}
