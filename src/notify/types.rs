//! Discord webhook payload types

use crate::search::Product;
use serde::{Deserialize, Serialize};

/// Shown in place of empty field values, which Discord rejects
const EMPTY_FIELD: &str = "-";

/// Webhook request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscordMessage {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub url: String,
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedThumbnail {
    pub url: String,
}

/// Error body returned by Discord on rejected requests
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookErrorBody {
    pub message: String,
}

impl EmbedField {
    fn new(name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: name.to_string(),
            value: if value.trim().is_empty() {
                EMPTY_FIELD.to_string()
            } else {
                value
            },
        }
    }
}

impl DiscordMessage {
    /// Build the notification for a product
    pub fn for_product(product: &Product, product_page_url: &str) -> Self {
        let price = product
            .price
            .map(|p| format!("¥{p}"))
            .unwrap_or_default();

        let embed = Embed {
            title: format!("{} - {}", product.brand_name, product.product_name),
            url: format!(
                "{}/{}",
                product_page_url.trim_end_matches('/'),
                product.product_code
            ),
            fields: vec![
                EmbedField::new("Size", product.size.as_str()),
                EmbedField::new("Product Condition", product.product_condition.as_str()),
                EmbedField::new("Price", price),
            ],
            thumbnail: product.thumbnail().map(|url| EmbedThumbnail {
                url: url.to_string(),
            }),
        };

        Self {
            embeds: vec![embed],
        }
    }
}
