//! Watermark tracking across ticks

use crate::config::InitialWatermark;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Creation-time boundary below which products count as already seen
///
/// Unset admits every product. The boundary only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Watermark(Option<DateTime<Utc>>);

impl Watermark {
    pub fn unset() -> Self {
        Self(None)
    }

    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self(Some(timestamp))
    }

    /// Starting watermark for the given startup policy
    pub fn initial(policy: InitialWatermark, now: DateTime<Utc>) -> Self {
        match policy {
            InitialWatermark::Now => Self::at(now),
            InitialWatermark::Unset => Self::unset(),
        }
    }

    pub fn get(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// True if a product created at `created_at` has not been reported yet
    pub fn admits(&self, created_at: DateTime<Utc>) -> bool {
        self.0.map_or(true, |mark| created_at > mark)
    }

    /// Like [`Watermark::admits`], but a listing without a readable
    /// timestamp is never treated as new
    pub fn admits_listing(&self, created_at: Option<DateTime<Utc>>) -> bool {
        created_at.is_some_and(|ts| self.admits(ts))
    }

    /// Watermark moved forward to `timestamp`; earlier timestamps are ignored
    pub fn advanced_to(self, timestamp: DateTime<Utc>) -> Self {
        match self.0 {
            Some(mark) if mark >= timestamp => self,
            _ => Self::at(timestamp),
        }
    }
}
