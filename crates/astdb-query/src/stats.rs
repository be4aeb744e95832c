//! Query engine statistics (spec.md §4.6 "Statistics").

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomically updated counters backing [`EngineStats`].
#[derive(Debug, Default)]
pub struct StatsInner {
    total_queries: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl StatsInner {
    pub fn record_query(&self) {
        self.total_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self, total_entries: u64) -> EngineStats {
        let total_queries = self.total_queries.load(Ordering::Relaxed);
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let cache_misses = self.cache_misses.load(Ordering::Relaxed);
        let hit_rate = if total_queries == 0 {
            0.0
        } else {
            cache_hits as f64 / total_queries as f64
        };
        EngineStats {
            total_queries,
            cache_hits,
            cache_misses,
            total_entries,
            hit_rate,
        }
    }
}

/// `{ total_queries, cache_hits, cache_misses, total_entries, hit_rate }`
/// (spec.md §4.6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineStats {
    pub total_queries: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub total_entries: u64,
    pub hit_rate: f64,
}
