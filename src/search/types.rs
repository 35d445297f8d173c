//! Search API wire types

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Offset of the marketplace's local time, used for timestamps without a zone
const MARKET_UTC_OFFSET_SECS: i32 = 9 * 3600;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Body of a search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A listed product, as returned by the search API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name: String,
    /// Identifier used in the product page URL
    #[serde(deserialize_with = "lenient_string")]
    pub product_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub size: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_condition: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Listing time; results are sorted on this, newest first.
    /// `None` when the API sent something unreadable.
    #[serde(default, deserialize_with = "deserialize_created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// First image, used as the notification thumbnail
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Parse an API timestamp
///
/// Accepts RFC 3339, or a naive date-time which is read as marketplace local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let offset = FixedOffset::east_opt(MARKET_UTC_OFFSET_SECS)?;
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Unreadable or missing timestamps decode as `None` instead of failing the page
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(raw)) => {
            let parsed = parse_timestamp(&raw);
            if parsed.is_none() {
                tracing::warn!(created_at = %raw, "Unrecognised product timestamp");
            }
            parsed
        }
        Some(other) => {
            tracing::warn!(created_at = %other, "Unrecognised product timestamp");
            None
        }
        None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

/// Accept a string, a number, or null (as an empty string)
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            Some(StringOrNumber::String(s)) => s,
            Some(StringOrNumber::Number(n)) => n.to_string(),
            None => String::new(),
        },
    )
}
