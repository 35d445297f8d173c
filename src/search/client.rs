//! HTTP client for the Rinkan search API

use super::{Product, ProductSource, QueryParams, SearchResponse};
use crate::config::Config;
use crate::error::SearchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Client for the product search endpoint
pub struct SearchClient {
    client: Client,
    search_url: String,
    params: QueryParams,
}

impl SearchClient {
    /// Create a client with an explicit per-request timeout
    pub fn new(
        search_url: impl Into<String>,
        params: QueryParams,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            search_url: search_url.into(),
            params,
        })
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, SearchError> {
        Self::new(
            config.api.search_url.clone(),
            QueryParams::from_config(config),
            config.monitor.request_timeout(),
        )
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }
}

#[async_trait]
impl ProductSource for SearchClient {
    async fn fetch_page(&self, page: Option<u32>) -> Result<Vec<Product>, SearchError> {
        tracing::debug!(url = %self.search_url, ?page, "Fetching search results");

        let response = self
            .client
            .get(&self.search_url)
            .query(&self.params.with_page(page))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let body = response.bytes().await?;
        let decoded: SearchResponse = serde_json::from_slice(&body)?;

        tracing::debug!(?page, products = decoded.products.len(), "Fetched search results");

        Ok(decoded.products)
    }
}
