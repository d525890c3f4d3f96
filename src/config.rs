// src/config.rs
// =============================================================================
// Configuration for a crawl.
//
// Everything tunable lives in FinderConfig:
// - [http]       request timeout and user agent for the fetcher
// - [blacklist]  excluded host suffixes and URL prefixes
// - [crawl]      concurrency, feed-hint pattern and per-level policies
//
// A config file is optional. Missing sections and fields fall back to the
// defaults below, and CLI flags are applied on top after loading.
// =============================================================================

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default pattern for URLs that look like they could be feeds.
pub const DEFAULT_FEED_HINT_PATTERN: &str = "rss|atom|rdf|xml|feed";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub http: HttpConfig,
    pub blacklist: BlacklistConfig,
    pub crawl: CrawlPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("feedfinder/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Static exclusion rules applied to every resolved link before it joins
/// the frontier.
///
/// Host entries are matched as suffixes of `"." + host`, so `.facebook.com`
/// excludes `facebook.com` and `m.facebook.com` but keeps
/// `thisisnotfacebook.com`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlacklistConfig {
    pub hosts: Vec<String>,
    pub url_prefixes: Vec<String>,
}

impl BlacklistConfig {
    /// An empty blacklist that lets everything through.
    pub fn empty() -> Self {
        Self {
            hosts: Vec::new(),
            url_prefixes: Vec::new(),
        }
    }
}

impl Default for BlacklistConfig {
    fn default() -> Self {
        Self {
            hosts: [
                ".facebook.com",
                ".google.com",
                ".instagram.com",
                ".microsoft.com",
                ".twitter.com",
                ".youtube.com",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            url_prefixes: ["javascript:", "mailto:", "tel:", "whatsapp:"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Which anchors become candidate links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorPolicy {
    /// Every `<a href>` is a candidate; classification sorts them out later.
    #[default]
    All,
    /// Only anchors whose href matches the feed-hint pattern.
    FeedHint,
}

/// How pages fetched at the last permitted depth are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnifferKind {
    /// Decode only the XML root element name.
    #[default]
    XmlRoot,
    /// Tokenize as HTML and look at the first tag.
    RootTag,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlPolicy {
    /// Concurrent fetches within one depth level. 1 means strictly sequential.
    pub workers: usize,
    /// At the last level, only fetch URLs matching `feed_hint_pattern`.
    pub final_level_hint: bool,
    /// Case-insensitive regex for URLs that look like feeds.
    pub feed_hint_pattern: String,
    pub anchors: AnchorPolicy,
    pub final_level_sniffer: SnifferKind,
}

impl Default for CrawlPolicy {
    fn default() -> Self {
        Self {
            workers: 1,
            final_level_hint: true,
            feed_hint_pattern: DEFAULT_FEED_HINT_PATTERN.to_string(),
            anchors: AnchorPolicy::All,
            final_level_sniffer: SnifferKind::XmlRoot,
        }
    }
}

impl FinderConfig {
    /// Loads a config file. Blacklist entries are lower-cased, since matching
    /// is done against lower-cased URLs.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::from_toml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: FinderConfig = toml::from_str(content)?;
        config.blacklist.normalize();
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crawl.workers == 0 {
            return Err(ConfigError::Invalid("crawl.workers must be at least 1".into()));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid("http.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}

impl BlacklistConfig {
    fn normalize(&mut self) {
        for entry in self.hosts.iter_mut().chain(self.url_prefixes.iter_mut()) {
            *entry = entry.trim().to_lowercase();
        }
        self.hosts.retain(|h| !h.is_empty());
        self.url_prefixes.retain(|p| !p.is_empty());
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FinderConfig::from_toml("").expect("empty config should parse");

        assert_eq!(config.http.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.blacklist, BlacklistConfig::default());
        assert_eq!(config.crawl.workers, 1);
        assert!(config.crawl.final_level_hint);
        assert_eq!(config.crawl.anchors, AnchorPolicy::All);
        assert_eq!(config.crawl.final_level_sniffer, SnifferKind::XmlRoot);
    }

    #[test]
    fn test_partial_config() {
        let content = r#"
[crawl]
workers = 4
anchors = "feed-hint"
final_level_sniffer = "root-tag"

[blacklist]
hosts = [" .Example.COM "]
"#;
        let config = FinderConfig::from_toml(content).expect("partial config should parse");

        assert_eq!(config.crawl.workers, 4);
        assert_eq!(config.crawl.anchors, AnchorPolicy::FeedHint);
        assert_eq!(config.crawl.final_level_sniffer, SnifferKind::RootTag);
        assert_eq!(config.crawl.feed_hint_pattern, DEFAULT_FEED_HINT_PATTERN);
        assert_eq!(config.blacklist.hosts, vec![".example.com"]);
        // Fields not given keep their defaults
        assert_eq!(config.blacklist.url_prefixes, BlacklistConfig::default().url_prefixes);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let content = r#"
[crawl]
anchors = "some"
"#;
        assert!(FinderConfig::from_toml(content).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\ntimeout_secs = 5").unwrap();

        let config = FinderConfig::load(file.path()).unwrap();
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_rejects_zero_workers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[crawl]\nworkers = 0").unwrap();

        let err = FinderConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FinderConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
