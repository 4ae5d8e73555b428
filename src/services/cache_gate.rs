use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::CacheEntry;
use crate::errors::HnResult;
use crate::services::top_stories::TopStoriesService;
use crate::sources::{ItemSource, ListingSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Served a stored entry, possibly one published while this request
    /// waited on another request's refresh.
    Hit,
    /// This request ran the aggregation.
    Refreshed,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Refreshed => "refreshed",
        }
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub entry: Arc<CacheEntry>,
    pub status: CacheStatus,
}

/// TTL-bounded, single-flight memoization of [`TopStoriesService::fetch`].
///
/// Staleness is checked on every request against the stored entry's
/// timestamp. At most one refresh runs at a time; requests that find the
/// entry stale while a refresh is in flight block on it and are served
/// its result. A failed refresh publishes nothing.
pub struct CacheGate<L: ListingSource, I: ItemSource> {
    service: TopStoriesService<L, I>,
    ttl: Duration,
    entry: RwLock<Option<Arc<CacheEntry>>>,
    refresh: Mutex<()>,
}

impl<L: ListingSource, I: ItemSource> CacheGate<L, I> {
    pub fn new(service: TopStoriesService<L, I>, ttl: Duration) -> Self {
        Self {
            service,
            ttl,
            entry: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self) -> HnResult<CacheLookup> {
        self.get_with_clock(Instant::now)
    }

    pub fn get_with_clock<C>(&self, clock: C) -> HnResult<CacheLookup>
    where
        C: Fn() -> Instant,
    {
        if let Some(entry) = self.fresh_entry(clock()) {
            return Ok(CacheLookup {
                entry,
                status: CacheStatus::Hit,
            });
        }

        let _refresh = self.refresh.lock().unwrap_or_else(PoisonError::into_inner);

        // Re-check: the refresh we waited on may have published
        if let Some(entry) = self.fresh_entry(clock()) {
            debug!("served entry from concurrent refresh");
            return Ok(CacheLookup {
                entry,
                status: CacheStatus::Hit,
            });
        }

        let started = Instant::now();
        let stories = self.service.fetch()?;
        let entry = Arc::new(
            CacheEntry::new(stories, self.service.count(), clock(), self.ttl)
                .with_build_time(started.elapsed()),
        );

        if !self.ttl.is_zero() {
            *self.entry.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&entry));
        }

        info!(
            stories = entry.len(),
            build_ms = entry.build_time.as_millis() as u64,
            ttl_secs = self.ttl.as_secs(),
            "cache refreshed"
        );

        Ok(CacheLookup {
            entry,
            status: CacheStatus::Refreshed,
        })
    }

    /// The last published entry, fresh or not.
    pub fn current(&self) -> Option<Arc<CacheEntry>> {
        self.entry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_fresh_at(&self, now: Instant) -> bool {
        self.fresh_entry(now).is_some()
    }

    fn fresh_entry(&self, now: Instant) -> Option<Arc<CacheEntry>> {
        self.entry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|entry| entry.is_fresh_at(now))
            .cloned()
    }
}
