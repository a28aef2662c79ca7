pub mod memory;
pub mod traits;

pub use memory::InMemoryClassificationStore;
pub use traits::{CacheHandle, ClassificationStore, Verdict};

impl Default for CacheHandle {
    /// A handle to a fresh, empty in-memory store.
    fn default() -> Self {
        CacheHandle::new(InMemoryClassificationStore::new())
    }
}
