use crate::domain::errors::AppError;
use crate::domain::logging::{LogComponent, TimeProvider, get_time_provider};
use crate::domain::market_data::{SeriesQuery, SeriesSource, SeriesTable};
use crate::{log_debug, log_info};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
struct CacheEntry {
    table: Rc<SeriesTable>,
    fetched_at: u64,
}

/// TTL cache of fetched series keyed by `(pair, interval, output_size)`.
///
/// The effective TTL of an entry is `min(ttl_ms, interval length)`: a new bar
/// cannot appear sooner than one interval after the last fetch.
#[derive(Debug, Clone)]
pub struct SeriesCache {
    ttl_ms: u64,
    entries: HashMap<SeriesQuery, CacheEntry>,
}

impl SeriesCache {
    pub fn new(ttl_ms: u64) -> Self {
        Self { ttl_ms, entries: HashMap::new() }
    }

    pub fn ttl_for(&self, query: &SeriesQuery) -> u64 {
        self.ttl_ms.min(query.interval.duration_ms())
    }

    fn is_fresh(&self, query: &SeriesQuery, entry: &CacheEntry, now: u64) -> bool {
        now.saturating_sub(entry.fetched_at) < self.ttl_for(query)
    }

    pub fn get(&self, query: &SeriesQuery, now: u64) -> Option<Rc<SeriesTable>> {
        self.entries
            .get(query)
            .filter(|entry| self.is_fresh(query, entry, now))
            .map(|entry| Rc::clone(&entry.table))
    }

    pub fn insert(&mut self, query: SeriesQuery, table: Rc<SeriesTable>, now: u64) {
        self.entries.insert(query, CacheEntry { table, fetched_at: now });
    }

    pub fn invalidate(&mut self, query: &SeriesQuery) -> bool {
        self.entries.remove(query).is_some()
    }

    /// Drop stale entries; returns how many were removed
    pub fn purge_expired(&mut self, now: u64) -> usize {
        let before = self.entries.len();
        let ttl_ms = self.ttl_ms;
        self.entries.retain(|query, entry| {
            now.saturating_sub(entry.fetched_at) < ttl_ms.min(query.interval.duration_ms())
        });
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Memoizing wrapper around any [`SeriesSource`]. Repeated fetches of a fresh
/// key return the very same `Rc`; failures are never cached.
pub struct CachedSeriesSource<S> {
    inner: S,
    cache: RefCell<SeriesCache>,
    clock: Option<Box<dyn TimeProvider>>,
}

impl<S: SeriesSource> CachedSeriesSource<S> {
    pub fn new(inner: S, ttl_ms: u64) -> Self {
        Self { inner, cache: RefCell::new(SeriesCache::new(ttl_ms)), clock: None }
    }

    /// Use a dedicated clock instead of the global time provider
    pub fn with_clock(mut self, clock: Box<dyn TimeProvider>) -> Self {
        self.clock = Some(clock);
        self
    }

    fn now(&self) -> u64 {
        match &self.clock {
            Some(clock) => clock.current_timestamp(),
            None => get_time_provider().current_timestamp(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub async fn fetch(&self, query: &SeriesQuery) -> Result<Rc<SeriesTable>, AppError> {
        let now = self.now();
        // The borrow must end before the await below.
        let cached = self.cache.borrow().get(query, now);
        if let Some(table) = cached {
            log_debug!(
                LogComponent::Infrastructure("SeriesCache"),
                "cache hit for {} @ {}",
                query.pair,
                query.interval
            );
            return Ok(table);
        }

        let table = Rc::new(self.inner.fetch_series(query).await?);
        let mut cache = self.cache.borrow_mut();
        cache.purge_expired(now);
        cache.insert(*query, Rc::clone(&table), self.now());
        Ok(table)
    }

    pub fn invalidate(&self, query: &SeriesQuery) {
        if self.cache.borrow_mut().invalidate(query) {
            log_info!(
                LogComponent::Infrastructure("SeriesCache"),
                "🔄 invalidated {} @ {}",
                query.pair,
                query.interval
            );
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.borrow().len()
    }
}
