use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::DisplayItem;

/// The published result of one aggregation run. Shared read-only once
/// stored; a newer run replaces it rather than mutating it.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    pub stories: Vec<DisplayItem>,
    pub count: usize,
    pub fetched_at: DateTime<Utc>,
    #[serde(skip)]
    pub stored_at: Instant,
    #[serde(rename = "ttl_ms", serialize_with = "serialize_millis")]
    pub ttl: Duration,
    #[serde(rename = "build_time_ms", serialize_with = "serialize_millis")]
    pub build_time: Duration,
}

impl CacheEntry {
    pub fn new(stories: Vec<DisplayItem>, count: usize, stored_at: Instant, ttl: Duration) -> Self {
        Self {
            stories,
            count,
            fetched_at: Utc::now(),
            stored_at,
            ttl,
            build_time: Duration::ZERO,
        }
    }

    pub fn with_build_time(mut self, build_time: Duration) -> Self {
        self.build_time = build_time;
        self
    }

    /// Stale once `now >= stored_at + ttl`. A zero TTL is never fresh.
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < self.ttl
    }

    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}
