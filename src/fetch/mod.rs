// src/fetch/mod.rs
// =============================================================================
// The fetch collaborator.
//
// The crawler only needs "give me the body at this URL, or an error". That
// contract is the Fetcher trait, so the crawl can run against the real HTTP
// client or against an in-memory stub in tests.
// =============================================================================

mod http;

#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::HttpFetcher;

#[async_trait]
pub trait Fetcher {
    /// GETs `url` and returns the whole body. Any failure, including a
    /// non-OK status, is one FetchError.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
