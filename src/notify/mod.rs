//! Notification module
//!
//! Formats matching products as Discord embeds and posts them to a webhook

mod discord;
mod types;

pub use discord::DiscordWebhook;
pub use types::{DiscordMessage, Embed, EmbedField, EmbedThumbnail, WebhookErrorBody};

use crate::error::NotifyError;
use crate::search::Product;
use async_trait::async_trait;

/// Trait for notification sinks
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification for a product
    async fn notify(&self, product: &Product) -> Result<(), NotifyError>;
}
