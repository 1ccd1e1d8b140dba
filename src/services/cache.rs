use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use crate::models::{Corpus, FilterSpec, StatisticsResult};

/// Memoized statistics summaries.
///
/// `summarize` is a pure function of the corpus and filter, so its output
/// can be cached per filter key. The whole cache is dropped whenever the
/// corpus is replaced; entries also age out on the configured TTL.
pub struct StatsCache {
    entries: Cache<String, Arc<StatisticsResult>>,
}

impl StatsCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<Arc<StatisticsResult>> {
        self.entries.get(key)
    }

    pub fn insert(&self, key: String, stats: Arc<StatisticsResult>) {
        self.entries.insert(key, stats);
    }

    /// Drop every entry; called after a corpus refresh.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for a statistics summary over one corpus and filter.
    pub fn stats(corpus: Corpus, spec: &FilterSpec) -> String {
        format!(
            "stats:{}:{}:{}",
            corpus.as_str(),
            spec.country.as_deref().unwrap_or("*"),
            spec.cpv_code.as_deref().unwrap_or("*"),
        )
    }
}
