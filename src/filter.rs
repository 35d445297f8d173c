//! Keyword filtering
//!
//! With a single keyword the search API already narrowed the results, so
//! matching is skipped. Otherwise any keyword appearing in the model name,
//! ignoring case, is a match.

use crate::search::{Product, SearchMode};

/// Decides whether a fetched product should be notified
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    mode: SearchMode,
    /// Upper-cased keywords
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            mode: SearchMode::for_keywords(keywords),
            keywords: keywords.iter().map(|k| k.to_uppercase()).collect(),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.mode == SearchMode::Delegated || self.keywords.is_empty() {
            return true;
        }
        self.matches_model_name(&product.model_name)
    }

    /// Substring match of any keyword, ignoring case
    pub fn matches_model_name(&self, model_name: &str) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let model_name = model_name.to_uppercase();
        self.keywords.iter().any(|k| model_name.contains(k.as_str()))
    }
}
