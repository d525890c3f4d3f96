// src/fetch/stub.rs
// In-memory Fetcher for crawl tests. Unknown URLs answer 404.
// A per-URL delay makes responses complete out of request order.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::FetchError;
use crate::fetch::Fetcher;

#[derive(Debug, Default)]
pub(crate) struct StubFetcher {
    pages: HashMap<String, Vec<u8>>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.as_bytes().to_vec());
        self
    }

    pub(crate) fn delayed(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// Every URL fetched so far, in request order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or(FetchError::Status(StatusCode::NOT_FOUND))
    }
}
