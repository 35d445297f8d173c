//! One poll-filter-notify cycle

use super::Watermark;
use crate::error::SearchError;
use crate::filter::KeywordFilter;
use crate::notify::Notifier;
use crate::search::{Product, ProductSource};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Per-tick behaviour
#[derive(Debug, Clone)]
pub struct TickSettings {
    /// Walk pages until the watermark is reached, instead of reading one page
    pub pagination: bool,
    /// Stop paging after this many pages even if the watermark was not reached
    pub max_pages: u32,
    /// Pause after each notification
    pub notification_delay: Duration,
}

/// How a tick ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TickOutcome {
    /// All pages were read; the watermark advanced
    Completed,
    /// Fetching failed; the watermark was left untouched
    Aborted { reason: String },
}

/// Summary of a single tick, including the watermark to carry into the next one
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub outcome: TickOutcome,
    pub pages_fetched: u32,
    /// Products newer than the watermark that passed the keyword filter
    pub matched: usize,
    pub notified: usize,
    pub failed_notifications: usize,
    pub watermark: Watermark,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl TickReport {
    pub fn is_completed(&self) -> bool {
        self.outcome == TickOutcome::Completed
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

#[derive(Debug, PartialEq, Eq)]
enum PageScan {
    /// Every product on the page was newer than the watermark
    Exhausted,
    /// A product at or below the watermark was found; later results are stale
    ReachedWatermark,
}

#[derive(Debug, Default)]
struct TickStats {
    pages_fetched: u32,
    matched: usize,
    notified: usize,
    failed_notifications: usize,
    /// Product codes already handled this tick, in case listings shift between pages
    seen: HashSet<String>,
}

/// Polls for new products and notifies the ones that match
pub struct Monitor<S, N> {
    source: S,
    notifier: N,
    filter: KeywordFilter,
    settings: TickSettings,
}

impl<S: ProductSource, N: Notifier> Monitor<S, N> {
    pub fn new(source: S, notifier: N, filter: KeywordFilter, settings: TickSettings) -> Self {
        Self {
            source,
            notifier,
            filter,
            settings,
        }
    }

    pub fn filter(&self) -> &KeywordFilter {
        &self.filter
    }

    pub fn settings(&self) -> &TickSettings {
        &self.settings
    }

    /// Run one tick starting now
    pub async fn tick(&self, watermark: Watermark) -> TickReport {
        self.tick_at(watermark, Utc::now()).await
    }

    /// Run one tick that started at `now`
    ///
    /// Never fails: fetch errors are logged and reported as [`TickOutcome::Aborted`],
    /// in which case the returned watermark equals the one passed in.
    pub async fn tick_at(&self, watermark: Watermark, now: DateTime<Utc>) -> TickReport {
        let tick_id = Uuid::new_v4();
        let span = tracing::info_span!("tick", %tick_id);

        async move {
            let started = Instant::now();
            let mut stats = TickStats::default();

            let (outcome, next) = match self.scan(watermark, &mut stats).await {
                Ok(()) => (TickOutcome::Completed, watermark.advanced_to(now)),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        status = ?e.status().map(|s| s.as_u16()),
                        "Monitor tick aborted"
                    );
                    (
                        TickOutcome::Aborted {
                            reason: e.to_string(),
                        },
                        watermark,
                    )
                }
            };

            let report = TickReport {
                tick_id,
                started_at: now,
                outcome,
                pages_fetched: stats.pages_fetched,
                matched: stats.matched,
                notified: stats.notified,
                failed_notifications: stats.failed_notifications,
                watermark: next,
                duration: started.elapsed(),
            };

            tracing::info!(
                completed = report.is_completed(),
                pages = report.pages_fetched,
                matched = report.matched,
                notified = report.notified,
                failed = report.failed_notifications,
                duration_ms = u64::try_from(report.duration.as_millis()).unwrap_or(u64::MAX),
                "Tick finished"
            );

            report
        }
        .instrument(span)
        .await
    }

    async fn scan(&self, watermark: Watermark, stats: &mut TickStats) -> Result<(), SearchError> {
        if !self.settings.pagination {
            let products = self.source.fetch_page(None).await?;
            stats.pages_fetched = 1;
            self.process_page(&products, watermark, stats).await;
            return Ok(());
        }

        for page in 1..=self.settings.max_pages {
            let products = self.source.fetch_page(Some(page)).await?;
            stats.pages_fetched += 1;

            if products.is_empty() {
                return Ok(());
            }
            if self.process_page(&products, watermark, stats).await == PageScan::ReachedWatermark {
                return Ok(());
            }
        }

        tracing::warn!(
            max_pages = self.settings.max_pages,
            "Stopped paging before reaching the watermark"
        );
        Ok(())
    }

    /// Notify every new, matching product on a page, in the order received
    async fn process_page(
        &self,
        products: &[Product],
        watermark: Watermark,
        stats: &mut TickStats,
    ) -> PageScan {
        for product in products {
            // results are newest first, so nothing after this is new either;
            // an unreadable timestamp ends the scan the same way
            if !watermark.admits_listing(product.created_at) {
                return PageScan::ReachedWatermark;
            }

            if !self.filter.matches(product) {
                tracing::debug!(
                    product_code = %product.product_code,
                    model_name = %product.model_name,
                    "Product does not match keywords"
                );
                continue;
            }

            // without a code there is nothing to tell listings apart by
            let duplicate = !product.product_code.is_empty()
                && !stats.seen.insert(product.product_code.clone());
            if duplicate {
                tracing::debug!(product_code = %product.product_code, "Already handled this tick");
                continue;
            }

            stats.matched += 1;
            match self.notifier.notify(product).await {
                Ok(()) => {
                    stats.notified += 1;
                    tracing::info!(
                        product_code = %product.product_code,
                        brand = %product.brand_name,
                        name = %product.product_name,
                        "Notified new product"
                    );
                }
                Err(e) => {
                    stats.failed_notifications += 1;
                    tracing::warn!(
                        error = %e,
                        product_code = %product.product_code,
                        "Webhook error"
                    );
                }
            }

            tokio::time::sleep(self.settings.notification_delay).await;
        }

        PageScan::Exhausted
    }
}
