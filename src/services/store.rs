use std::sync::{Arc, PoisonError, RwLock};

use crate::models::TenderRecord;

/// Holder of the procurement record corpus.
///
/// Read-mostly: every query clones an `Arc` snapshot, so reads never block
/// each other and never observe a half-replaced corpus. The lock is held
/// only for the pointer swap during a wholesale refresh; records are never
/// mutated field by field.
pub struct TenderStore {
    records: RwLock<Arc<Vec<TenderRecord>>>,
}

impl TenderStore {
    /// Create a store over an initial corpus.
    pub fn new(records: Vec<TenderRecord>) -> Self {
        Self {
            records: RwLock::new(Arc::new(records)),
        }
    }

    /// Current corpus snapshot, in insertion order.
    pub fn all(&self) -> Arc<Vec<TenderRecord>> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the corpus wholesale.
    ///
    /// In-flight readers keep the snapshot they already hold; new reads see
    /// the fresh corpus.
    pub fn replace(&self, records: Vec<TenderRecord>) {
        let mut guard = self.records.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(records);
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}
