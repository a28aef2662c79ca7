/* 📖 # Why a ClassificationStore trait?

Happy number classification is memoized across requests. The store is the only mutable state
shared between request threads, so it gets the same treatment the platform layer gets:
a small trait describing what the engine needs, one in-memory implementation, and a cheaply
cloneable handle that owns the locking.

Lifecycle: one store per process, created at startup and injected into the calculators.
It only ever grows. Dropping every entry would cost speed, never correctness.
*/

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

/// Whether a number was proven happy or unhappy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Happy,
    Unhappy,
}

impl Verdict {
    pub fn from_happy(is_happy: bool) -> Self {
        if is_happy {
            Verdict::Happy
        } else {
            Verdict::Unhappy
        }
    }

    pub fn is_happy(&self) -> bool {
        matches!(self, Verdict::Happy)
    }
}

/// Storage for happy number classifications.
///
/// Implementations keep two disjoint sets. A value, once recorded, keeps its verdict forever.
pub trait ClassificationStore: Send + Sync + 'static {
    /// Look up the verdict for a value, if it has been classified before.
    fn lookup(&self, value: u64) -> Option<Verdict>;

    /// Record every value in `values` under `verdict`.
    ///
    /// Values already recorded are left untouched. Returns the number of values newly added.
    fn record(&mut self, values: &HashSet<u64>, verdict: Verdict) -> usize;

    /// Number of values known to be happy.
    fn happy_count(&self) -> usize;

    /// Number of values known to be unhappy.
    fn unhappy_count(&self) -> usize;

    /// Total number of classified values.
    fn len(&self) -> usize {
        self.happy_count() + self.unhappy_count()
    }

    /// Returns true if nothing has been classified yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A thread-safe handle to a classification store.
///
/// Cloning is cheap (Arc). Lookups take the read lock, recording takes the write lock, so two
/// threads racing on the same value at worst both compute it.
#[derive(Clone)]
pub struct CacheHandle(Arc<RwLock<dyn ClassificationStore>>);

impl CacheHandle {
    /// Create a new CacheHandle wrapping the given store implementation.
    pub fn new<S: ClassificationStore>(store: S) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    /// See [`ClassificationStore::lookup`].
    pub fn lookup(&self, value: u64) -> Option<Verdict> {
        self.0.read().lookup(value)
    }

    /// See [`ClassificationStore::record`].
    pub fn record(&self, values: &HashSet<u64>, verdict: Verdict) -> usize {
        if values.is_empty() {
            return 0;
        }
        self.0.write().record(values, verdict)
    }

    pub fn happy_count(&self) -> usize {
        self.0.read().happy_count()
    }

    pub fn unhappy_count(&self) -> usize {
        self.0.read().unhappy_count()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

impl std::fmt::Debug for CacheHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.0.read();
        f.debug_struct("CacheHandle")
            .field("happy", &store.happy_count())
            .field("unhappy", &store.unhappy_count())
            .finish()
    }
}
