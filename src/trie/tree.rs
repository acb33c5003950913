//! The radix tree container

use super::Node;
use crate::config::{DigestMode, TrieConfig};
use crate::model::{Hash, Hashable};
use std::fmt;
use tracing::debug;

/// A path-compressed radix tree over byte keys with a Merkle root digest
///
/// The digest returned by [`hash`](RadixTree::hash) depends only on the
/// current key→value mapping, never on the order of the puts and removes
/// that produced it, so two replicas can compare contents by digest alone.
///
/// Keys may be empty. A key can be present with a null value: `put(k, None)`
/// makes `k` exist, and every lookup reports existence as a separate `bool`.
///
/// The tree is a single-owner structure; see
/// [`SharedTree`](super::SharedTree) for a locked handle.
#[derive(Clone, Debug)]
pub struct RadixTree<V> {
    root: Node<V>,
    size: usize,
    config: TrieConfig,
}

impl<V: Hashable> RadixTree<V> {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        RadixTree {
            root: Node::root(),
            size: 0,
            config,
        }
    }

    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Insert or overwrite a key.
    ///
    /// Returns the previous value and whether the key existed; a key that
    /// existed with a null value yields `(None, true)`.
    pub fn put(&mut self, key: impl AsRef<[u8]>, value: Option<V>) -> (Option<V>, bool) {
        let (old, existed) = self.root.put(key.as_ref(), value);
        if !existed {
            self.size += 1;
        }
        self.settle();
        (old, existed)
    }

    /// Look up a key, reporting existence separately from the value
    pub fn get(&self, key: impl AsRef<[u8]>) -> (Option<&V>, bool) {
        match self.root.get(key.as_ref()) {
            Some(value) => (value.as_ref(), true),
            None => (None, false),
        }
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.root.get(key.as_ref()).is_some()
    }

    /// Remove a key, returning its value and whether it existed
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> (Option<V>, bool) {
        match self.root.remove(key.as_ref()) {
            Some(old) => {
                self.size -= 1;
                self.settle();
                (old, true)
            }
            None => (None, false),
        }
    }

    /// Number of keys present, including keys with null values
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Remove every key
    pub fn clear(&mut self) {
        self.root = Node::root();
        self.size = 0;
    }

    /// The root digest of the whole tree
    ///
    /// Stale subtree digests are recomputed bottom-up; untouched subtrees
    /// reuse their cached digest. The empty tree hashes to [`Hash::ZERO`].
    pub fn hash(&self) -> Hash {
        if self.root.is_empty() {
            return Hash::ZERO;
        }
        if !self.root.is_digest_cached() {
            debug!(size = self.size, "recomputing root digest");
        }
        self.root.digest()
    }

    /// The root node, for walking the structure
    pub fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Human-readable rendering of the tree structure, for diagnostics
    ///
    /// Shows each node's fragment, the short digest of its value (or `null`)
    /// and its cached digest when one is current. Never changes the tree.
    pub fn describe(&self) -> String {
        let mut out = format!("RadixTree(size={})\n", self.size);
        self.root.describe(1, &mut out);
        out
    }

    fn settle(&self) {
        if self.config.digest_mode == DigestMode::Eager && !self.root.is_empty() {
            self.root.digest();
        }
    }
}

impl<V: Hashable> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Hashable> fmt::Display for RadixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<K: AsRef<[u8]>, V: Hashable> Extend<(K, Option<V>)> for RadixTree<V> {
    fn extend<I: IntoIterator<Item = (K, Option<V>)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: AsRef<[u8]>, V: Hashable> FromIterator<(K, Option<V>)> for RadixTree<V> {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut tree = RadixTree::new();
        tree.extend(iter);
        tree
    }
}
