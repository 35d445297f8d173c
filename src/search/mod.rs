//! Product search module
//!
//! Builds the Rinkan search query from configuration and fetches pages of
//! newly listed products, newest first.

mod client;
mod query;
mod types;

pub use client::SearchClient;
pub use query::{Color, QueryParams, SearchMode};
pub use types::{parse_timestamp, Product, SearchResponse};

use crate::error::SearchError;
use async_trait::async_trait;

/// Trait for product listing sources
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one page of results. `None` requests the unpaginated first page.
    async fn fetch_page(&self, page: Option<u32>) -> Result<Vec<Product>, SearchError>;
}
