//! A lock-guarded handle for sharing one tree between threads

use super::RadixTree;
use crate::config::TrieConfig;
use crate::model::{Hash, Hashable};
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable handle to a [`RadixTree`] behind a single mutex
///
/// Every call takes the lock for its whole duration, so no reader can
/// observe a split or merge half-done.
pub struct SharedTree<V> {
    inner: Arc<Mutex<RadixTree<V>>>,
}

impl<V> Clone for SharedTree<V> {
    fn clone(&self) -> Self {
        SharedTree {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Hashable> SharedTree<V> {
    pub fn new() -> Self {
        Self::from_tree(RadixTree::new())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        Self::from_tree(RadixTree::with_config(config))
    }

    pub fn from_tree(tree: RadixTree<V>) -> Self {
        SharedTree {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    pub fn put(&self, key: impl AsRef<[u8]>, value: Option<V>) -> (Option<V>, bool) {
        self.inner.lock().put(key, value)
    }

    pub fn remove(&self, key: impl AsRef<[u8]>) -> (Option<V>, bool) {
        self.inner.lock().remove(key)
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.inner.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn hash(&self) -> Hash {
        self.inner.lock().hash()
    }

    pub fn describe(&self) -> String {
        self.inner.lock().describe()
    }

    /// Run `f` with exclusive access to the tree
    pub fn with<R>(&self, f: impl FnOnce(&mut RadixTree<V>) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

impl<V: Hashable + Clone> SharedTree<V> {
    /// Look up a key, cloning the value out of the lock
    pub fn get(&self, key: impl AsRef<[u8]>) -> (Option<V>, bool) {
        let tree = self.inner.lock();
        let (value, existed) = tree.get(key);
        (value.cloned(), existed)
    }
}

impl<V: Hashable> Default for SharedTree<V> {
    fn default() -> Self {
        Self::new()
    }
}
