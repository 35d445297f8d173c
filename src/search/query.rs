//! Search query construction
//!
//! Translates the user's filters into the query string the search API expects.
//! The API's free-text search takes a single term, so keyword handling depends
//! on how many keywords are configured.

use crate::config::Config;
use serde::Deserialize;

/// Colors understood by the search API
///
/// Declaration order is the order color filters are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Gray,
    Black,
    Brown,
    Beige,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    Orange,
    Silver,
    Gold,
    Others,
}

impl Color {
    /// Localized label the search API filters on
    pub fn label(self) -> &'static str {
        match self {
            Color::White => "ホワイト",
            Color::Gray => "グレー",
            Color::Black => "ブラック",
            Color::Brown => "ブラウン",
            Color::Beige => "ベージュ",
            Color::Yellow => "イエロー",
            Color::Green => "グリーン",
            Color::Blue => "ブルー",
            Color::Purple => "パープル",
            Color::Pink => "ピンク",
            Color::Red => "レッド",
            Color::Orange => "オレンジ",
            Color::Silver => "シルバー",
            Color::Gold => "ゴールド",
            Color::Others => "その他",
        }
    }
}

/// How keyword criteria are enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Exactly one keyword, sent to the API's own search
    Delegated,
    /// Zero or several keywords, matched locally against model names
    LocalFilter,
}

impl SearchMode {
    pub fn for_keywords(keywords: &[String]) -> Self {
        if keywords.len() == 1 {
            SearchMode::Delegated
        } else {
            SearchMode::LocalFilter
        }
    }
}

/// Static query parameters, built once and reused for every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
    mode: SearchMode,
}

impl QueryParams {
    /// Build the query from configuration
    pub fn from_config(config: &Config) -> Self {
        let mode = SearchMode::for_keywords(&config.keywords);

        let mut pairs = vec![
            ("sort", "latest".to_string()),
            // only items currently in stock
            ("stockLimit", "1".to_string()),
        ];

        if let Some(brand) = config.brand() {
            pairs.push(("brand", brand.to_string()));
        }

        if mode == SearchMode::Delegated {
            pairs.push(("keyword", config.keywords[0].clone()));
        }

        pairs.extend(
            config
                .colors
                .iter()
                .filter(|(_, enabled)| **enabled)
                .map(|(color, _)| ("color[]", color.label().to_string())),
        );

        pairs.extend(
            config
                .categories
                .iter()
                .map(|category| ("category", category.clone())),
        );

        Self { pairs, mode }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Query pairs for a request, with `page` appended when paginating
    pub fn with_page(&self, page: Option<u32>) -> Vec<(&'static str, String)> {
        let mut pairs = self.pairs.clone();
        if let Some(page) = page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }

    /// Values for a repeatable key, in emission order
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}
