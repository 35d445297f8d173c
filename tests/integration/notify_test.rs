//! Discord webhook tests

use crate::common::{config, t, WEBHOOK_PATH};
use reqwest::StatusCode;
use rinkan_monitor::error::NotifyError;
use rinkan_monitor::notify::{DiscordMessage, DiscordWebhook, Notifier};
use rinkan_monitor::search::Product;
use rust_decimal_macros::dec;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product() -> Product {
    Product {
        brand_name: "OMEGA".to_string(),
        product_name: "Speedmaster Professional".to_string(),
        product_code: "2400123456789".to_string(),
        model_name: "Speedmaster Professional".to_string(),
        size: "42mm".to_string(),
        product_condition: "A".to_string(),
        price: Some(dec!(858000)),
        created_at: Some(t(60)),
        images: vec!["https://img.example.com/1.jpg".to_string()],
    }
}

#[tokio::test]
async fn test_posts_embed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let webhook = DiscordWebhook::from_config(&config(&server, "", "")).unwrap();
    webhook.notify(&product()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let message: DiscordMessage = requests[0].body_json().unwrap();
    let embed = &message.embeds[0];
    assert_eq!(embed.title, "OMEGA - Speedmaster Professional");
    assert_eq!(embed.url, "https://rinkan-online.com/products/2400123456789");
    assert_eq!(embed.fields[0].name, "Size");
    assert_eq!(embed.fields[1].name, "Product Condition");
    assert_eq!(embed.fields[2].value, "¥858000");
    assert_eq!(
        embed.thumbnail.as_ref().unwrap().url,
        "https://img.example.com/1.jpg"
    );
}

#[tokio::test]
async fn test_rejection_carries_discord_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "message": "You are being rate limited.",
            "retry_after": 0.5,
            "global": false
        })))
        .mount(&server)
        .await;

    let webhook = DiscordWebhook::from_config(&config(&server, "", "")).unwrap();
    let err = webhook.notify(&product()).await.unwrap_err();

    match err {
        NotifyError::Rejected { status, message } => {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
            assert_eq!(message, "You are being rate limited.");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}
