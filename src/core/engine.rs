use std::sync::Arc;

use crate::core::filters::matches_filter;
use crate::models::{Corpus, FilterSpec, TenderRecord};
use crate::services::TenderStore;

/// Query orchestrator over the shared tender corpus.
///
/// Every call works on a fresh snapshot of the store and allocates its own
/// result vector, so searches run fully in parallel with no shared mutable
/// state.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<TenderStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<TenderStore>) -> Self {
        Self { store }
    }

    /// Find records matching the filter, bounded by the spec's limit.
    ///
    /// Truncation happens after filtering: the limit bounds the matched set,
    /// not a raw prefix of the corpus. No match is a normal empty result,
    /// never an error.
    pub fn search(&self, spec: &FilterSpec, corpus: Corpus) -> Vec<TenderRecord> {
        self.store
            .all()
            .iter()
            .filter(|record| record.is_award == corpus.is_award())
            .filter(|record| matches_filter(record, spec))
            .take(spec.limit)
            .cloned()
            .collect()
    }

    /// Every record matching the filter, untruncated.
    ///
    /// The statistics path uses this so aggregates cover the whole matched
    /// set rather than one page of it.
    pub fn matching(&self, spec: &FilterSpec, corpus: Corpus) -> Vec<TenderRecord> {
        self.store
            .all()
            .iter()
            .filter(|record| record.is_award == corpus.is_award())
            .filter(|record| matches_filter(record, spec))
            .cloned()
            .collect()
    }
}
