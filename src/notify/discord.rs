//! Discord webhook notifier

use super::{DiscordMessage, Notifier, WebhookErrorBody};
use crate::config::Config;
use crate::error::NotifyError;
use crate::search::Product;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Posts product embeds to a Discord webhook
pub struct DiscordWebhook {
    client: Client,
    webhook_url: String,
    product_page_url: String,
}

impl DiscordWebhook {
    pub fn new(
        webhook_url: impl Into<String>,
        product_page_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
            product_page_url: product_page_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        Self::new(
            config.discord_webhook_url.clone(),
            config.api.product_page_url.clone(),
            config.monitor.request_timeout(),
        )
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn notify(&self, product: &Product) -> Result<(), NotifyError> {
        let message = DiscordMessage::for_product(product, &self.product_page_url);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status,
                message: error_message(&body, status),
            });
        }

        Ok(())
    }
}

/// Extract Discord's `message` from an error body, falling back to the raw text
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<WebhookErrorBody>(body) {
        return parsed.message;
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}
