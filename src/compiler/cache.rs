//! Compilation cache keyed by content hash.
//!
//! No TTL and no invalidation besides [`CompilationStore::clear`]. A hash
//! collision between two sources returns the other source's result.

use fxhash::FxHashMap;
use parking_lot::Mutex;

use super::types::CompilationResult;
use crate::utils::hash::ContentHash;

/// Storage for compiled previews, shared between concurrent callers.
pub trait CompilationStore: Send + Sync {
    fn get(&self, key: ContentHash) -> Option<CompilationResult>;
    fn insert(&self, key: ContentHash, result: CompilationResult);
    fn clear(&self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process store living as long as the compiler that owns it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FxHashMap<ContentHash, CompilationResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompilationStore for MemoryStore {
    fn get(&self, key: ContentHash) -> Option<CompilationResult> {
        self.entries.lock().get(&key).cloned()
    }

    fn insert(&self, key: ContentHash, result: CompilationResult) {
        self.entries.lock().insert(key, result);
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
