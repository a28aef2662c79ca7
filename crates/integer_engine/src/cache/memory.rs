use std::collections::HashSet;

use tracing::warn;

use crate::cache::traits::{ClassificationStore, Verdict};

/// An in-memory classification store backed by two HashSets.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use integer_engine::cache::{ClassificationStore, InMemoryClassificationStore, Verdict};
///
/// let mut store = InMemoryClassificationStore::new();
/// let visited: HashSet<u64> = [7, 49, 97, 130, 10].into_iter().collect();
/// assert_eq!(store.record(&visited, Verdict::Happy), 5);
///
/// assert_eq!(store.lookup(97), Some(Verdict::Happy));
/// assert_eq!(store.lookup(4), None);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryClassificationStore {
    known_happy: HashSet<u64>,
    known_unhappy: HashSet<u64>,
}

impl InMemoryClassificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set a verdict is recorded in, and the set holding the opposite verdict.
    fn sets_mut(&mut self, verdict: Verdict) -> (&mut HashSet<u64>, &HashSet<u64>) {
        match verdict {
            Verdict::Happy => (&mut self.known_happy, &self.known_unhappy),
            Verdict::Unhappy => (&mut self.known_unhappy, &self.known_happy),
        }
    }
}

impl ClassificationStore for InMemoryClassificationStore {
    fn lookup(&self, value: u64) -> Option<Verdict> {
        if self.known_happy.contains(&value) {
            Some(Verdict::Happy)
        } else if self.known_unhappy.contains(&value) {
            Some(Verdict::Unhappy)
        } else {
            None
        }
    }

    fn record(&mut self, values: &HashSet<u64>, verdict: Verdict) -> usize {
        let (target, opposite) = self.sets_mut(verdict);
        let mut added = 0;
        for &value in values {
            if opposite.contains(&value) {
                // Happiness is a property of the number; reaching this means a bug upstream.
                warn!(value, ?verdict, "ignoring classification contradicting the cache");
                continue;
            }
            if target.insert(value) {
                added += 1;
            }
        }
        added
    }

    fn happy_count(&self) -> usize {
        self.known_happy.len()
    }

    fn unhappy_count(&self) -> usize {
        self.known_unhappy.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u64]) -> HashSet<u64> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_store_new_is_empty() {
        let store = InMemoryClassificationStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.lookup(1), None);
    }

    #[test]
    fn test_record_and_lookup() {
        let mut store = InMemoryClassificationStore::new();
        assert_eq!(store.record(&set(&[19, 82, 68, 100]), Verdict::Happy), 4);
        assert_eq!(store.record(&set(&[2, 4, 16]), Verdict::Unhappy), 3);

        assert_eq!(store.lookup(82), Some(Verdict::Happy));
        assert_eq!(store.lookup(16), Some(Verdict::Unhappy));
        assert_eq!(store.lookup(3), None);
        assert_eq!(store.happy_count(), 4);
        assert_eq!(store.unhappy_count(), 3);
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn test_record_counts_only_new_values() {
        let mut store = InMemoryClassificationStore::new();
        store.record(&set(&[7, 49]), Verdict::Happy);

        assert_eq!(store.record(&set(&[49, 97]), Verdict::Happy), 1);
        assert_eq!(store.happy_count(), 3);
    }

    #[test]
    fn test_contradicting_record_is_ignored() {
        let mut store = InMemoryClassificationStore::new();
        store.record(&set(&[4, 16]), Verdict::Unhappy);

        assert_eq!(store.record(&set(&[16, 1000]), Verdict::Happy), 1);
        assert_eq!(store.lookup(16), Some(Verdict::Unhappy));
        assert_eq!(store.lookup(1000), Some(Verdict::Happy));
    }

    #[test]
    fn test_verdict_from_happy() {
        assert_eq!(Verdict::from_happy(true), Verdict::Happy);
        assert_eq!(Verdict::from_happy(false), Verdict::Unhappy);
        assert!(Verdict::Happy.is_happy());
        assert!(!Verdict::Unhappy.is_happy());
    }
}
