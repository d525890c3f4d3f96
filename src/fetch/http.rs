// src/fetch/http.rs
// =============================================================================
// reqwest-backed Fetcher.
//
// Behaviour:
// - GET with a fixed timeout (2 minutes unless configured otherwise)
// - only 200 OK is a success, every other status is an error
// - no retries; redirects are followed by reqwest's default policy
// =============================================================================

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::config::HttpConfig;
use crate::error::{FetchError, FinderError};
use crate::fetch::Fetcher;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, FinderError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FinderError::HttpClient)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
