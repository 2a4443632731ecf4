//! In-memory feedback store.
//!
//! Feedback lives only for the process lifetime. Ids come from a private
//! counter that starts at 1 and is never rewound, not even by `clear_all`.

use crate::error::Result;
use crate::store::RecordStore;
use crate::types::{Feedback, NewFeedback, RecordId, Timestamp};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

struct Inner {
    next_id: RecordId,
    records: BTreeMap<RecordId, Feedback>,
}

/// Volatile, sequentially-keyed feedback store.
pub struct FeedbackStore {
    inner: RwLock<Inner>,
}

impl FeedbackStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: RecordId::FIRST,
                records: BTreeMap::new(),
            }),
        }
    }

    /// Store a complete candidate. Infallible; the trait method wraps this.
    pub fn insert(&self, candidate: NewFeedback) -> Feedback {
        let mut inner = self.inner.write();

        let id = inner.next_id;
        inner.next_id = id.next();

        let feedback = Feedback {
            id,
            name: candidate.name,
            email: candidate.email,
            category: candidate.category,
            message: candidate.message,
            date: Timestamp::now(),
        };
        inner.records.insert(id, feedback.clone());

        feedback
    }

    /// Records whose category equals `category` exactly, in insertion order.
    pub fn list_by_category(&self, category: &str) -> Vec<Feedback> {
        self.inner
            .read()
            .records
            .values()
            .filter(|f| f.category == category)
            .cloned()
            .collect()
    }

    /// Remove every record. The id counter keeps counting.
    pub fn clear_all(&self) {
        let mut inner = self.inner.write();
        let removed = inner.records.len();
        inner.records.clear();
        debug!(removed, next_id = %inner.next_id, "cleared feedback");
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FeedbackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for FeedbackStore {
    type Record = Feedback;
    type Candidate = NewFeedback;

    fn create(&self, candidate: NewFeedback) -> Result<Feedback> {
        Ok(self.insert(candidate))
    }

    fn get_by_id(&self, id: RecordId) -> Option<Feedback> {
        self.inner.read().records.get(&id).cloned()
    }

    fn list_all(&self) -> Vec<Feedback> {
        // BTreeMap order is ascending id, which is insertion order.
        self.inner.read().records.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, category: &str) -> NewFeedback {
        NewFeedback::new(name, format!("{}@x.com", name.to_lowercase()), category, "m")
    }

    #[test]
    fn test_ids_start_at_one() {
        let store = FeedbackStore::new();
        let first = store.insert(candidate("A", "bug"));
        let second = store.insert(candidate("B", "bug"));

        assert_eq!(first.id, RecordId(1));
        assert_eq!(second.id, RecordId(2));
    }

    #[test]
    fn test_clear_keeps_counter() {
        let store = FeedbackStore::new();
        store.insert(candidate("A", "bug"));
        store.insert(candidate("B", "idea"));

        store.clear_all();
        assert!(store.is_empty());

        let next = store.insert(candidate("C", "bug"));
        assert_eq!(next.id, RecordId(3));
        assert_eq!(store.list_all(), vec![next]);
    }

    #[test]
    fn test_list_by_category_exact_match() {
        let store = FeedbackStore::new();
        let bug = store.insert(candidate("A", "bug"));
        store.insert(candidate("B", "Bug"));
        store.insert(candidate("C", "bugs"));

        assert_eq!(store.list_by_category("bug"), vec![bug]);
        assert!(store.list_by_category("missing").is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let store = FeedbackStore::new();
        let created = store.create(candidate("A", "bug")).unwrap();

        assert_eq!(store.get_by_id(created.id), Some(created));
        assert_eq!(store.get_by_id(RecordId(99)), None);
    }
}
