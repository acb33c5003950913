//! Trie node and the node-level algorithms

use super::digest::{combine, ValueState};
use crate::model::{Hash, Hashable};
use std::cell::Cell;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::trace;

/// A vertex of the radix trie
///
/// - `fragment` is the edge label from the parent; a child's fragment always
///   starts with the byte it is filed under in the parent's `children`
/// - `value` is `Some` iff a key terminates here; the inner `Option` is the
///   stored value, which may itself be null
/// - the digest is cached and reset to `None` whenever the subtree changes
///
/// Apart from the root, every node holds a key or has at least two children.
#[derive(Clone, Debug)]
pub struct Node<V> {
    fragment: Vec<u8>,
    value: Option<Option<V>>,
    children: BTreeMap<u8, Node<V>>,
    digest: Cell<Option<Hash>>,
}

impl<V> Node<V> {
    /// The root: empty fragment, no value, no children
    pub(crate) fn root() -> Self {
        Node::with(Vec::new(), None)
    }

    fn with(fragment: Vec<u8>, value: Option<Option<V>>) -> Self {
        Node {
            fragment,
            value,
            children: BTreeMap::new(),
            digest: Cell::new(None),
        }
    }

    /// Edge label from the parent to this node
    pub fn fragment(&self) -> &[u8] {
        &self.fragment
    }

    /// `None` if no key ends here, otherwise the stored (possibly null) value
    pub fn value(&self) -> Option<Option<&V>> {
        self.value.as_ref().map(Option::as_ref)
    }

    /// Child filed under the given discriminating byte
    pub fn child(&self, byte: u8) -> Option<&Node<V>> {
        self.children.get(&byte)
    }

    /// Children in ascending discriminating-byte order
    pub fn children(&self) -> impl ExactSizeIterator<Item = (u8, &Node<V>)> {
        self.children.iter().map(|(b, c)| (*b, c))
    }

    /// Whether the cached digest is current
    pub fn is_digest_cached(&self) -> bool {
        self.digest.get().is_some()
    }

    fn invalidate(&self) {
        self.digest.set(None);
    }

    /// Insert or overwrite `key`, which must begin at this node.
    ///
    /// Returns the previous value and whether the key existed.
    pub(crate) fn put(&mut self, key: &[u8], value: Option<V>) -> (Option<V>, bool) {
        let mut node = self;
        let mut rest = key;
        loop {
            node.invalidate();

            let shared = common_prefix_len(&node.fragment, rest);
            if shared < node.fragment.len() {
                node.split(shared);
            }

            rest = &rest[node.fragment.len()..];
            let Some(&next) = rest.first() else {
                return match node.value.replace(value) {
                    Some(old) => (old, true),
                    None => (None, false),
                };
            };

            match node.children.entry(next) {
                Entry::Occupied(child) => node = child.into_mut(),
                Entry::Vacant(slot) => {
                    slot.insert(Node::with(rest.to_vec(), Some(value)));
                    return (None, false);
                }
            }
        }
    }

    /// Push everything past `at` down into a new single child
    fn split(&mut self, at: usize) {
        trace!(at, len = self.fragment.len(), "splitting node");
        let tail = self.fragment.split_off(at);
        let first = tail[0];
        let lower = Node {
            fragment: tail,
            value: self.value.take(),
            children: std::mem::take(&mut self.children),
            digest: Cell::new(None),
        };
        self.children.insert(first, lower);
    }

    /// Look up `key`, which must begin at this node.
    ///
    /// The outer `Option` is existence, the inner one the stored value.
    pub(crate) fn get(&self, key: &[u8]) -> Option<&Option<V>> {
        let mut node = self;
        let mut rest = key;
        loop {
            rest = rest.strip_prefix(node.fragment.as_slice())?;
            match rest.first() {
                None => return node.value.as_ref(),
                Some(next) => node = node.children.get(next)?,
            }
        }
    }

    /// Remove `key`, which must begin at this node.
    ///
    /// Children left without a key and without children are dropped; children
    /// left without a key and with a single child are merged into it.
    pub(crate) fn remove(&mut self, key: &[u8]) -> Option<Option<V>> {
        let rest = key.strip_prefix(self.fragment.as_slice())?;
        let removed = match rest.first() {
            None => self.value.take()?,
            Some(&next) => {
                let child = self.children.get_mut(&next)?;
                let removed = child.remove(rest)?;
                if child.value.is_none() {
                    match child.children.len() {
                        0 => {
                            self.children.remove(&next);
                        }
                        1 => child.merge_only_child(),
                        _ => {}
                    }
                }
                removed
            }
        };
        self.invalidate();
        Some(removed)
    }

    fn merge_only_child(&mut self) {
        let Some(only) = std::mem::take(&mut self.children).into_values().next() else {
            return;
        };
        trace!(
            upper = self.fragment.len(),
            lower = only.fragment.len(),
            "merging node into its only child"
        );
        self.fragment.extend_from_slice(&only.fragment);
        self.value = only.value;
        self.children = only.children;
        self.invalidate();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }
}

impl<V: Hashable> Node<V> {
    /// Digest of this subtree, recomputing stale descendants bottom-up
    ///
    /// The walk uses an explicit stack and only descends into nodes whose
    /// cached digest is stale, so depth is bounded by the heap, not the
    /// thread stack.
    pub fn digest(&self) -> Hash {
        if let Some(cached) = self.digest.get() {
            return cached;
        }

        let mut stack = vec![(self, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                node.refresh();
                continue;
            }
            stack.push((node, true));
            stack.extend(
                node.children
                    .values()
                    .filter(|c| !c.is_digest_cached())
                    .map(|c| (c, false)),
            );
        }

        self.cached_or_refresh()
    }

    fn cached_or_refresh(&self) -> Hash {
        self.digest.get().unwrap_or_else(|| self.refresh())
    }

    /// Recompute this node's digest from its (already current) children
    fn refresh(&self) -> Hash {
        let children: Vec<(u8, Hash)> = self
            .children
            .iter()
            .map(|(b, c)| (*b, c.cached_or_refresh()))
            .collect();
        let value = match &self.value {
            None => ValueState::Absent,
            Some(None) => ValueState::Null,
            Some(Some(v)) => ValueState::Present(v.digest()),
        };
        let digest = combine(&self.fragment, value, &children);
        self.digest.set(Some(digest));
        digest
    }

    /// Indented rendering of this subtree, one node per line
    pub(crate) fn describe(&self, depth: usize, out: &mut String) {
        let mut stack = vec![(self, depth)];
        while let Some((node, depth)) = stack.pop() {
            node.describe_line(depth, out);
            // Reversed so children pop in ascending byte order
            stack.extend(node.children.values().rev().map(|c| (c, depth + 1)));
        }
    }

    fn describe_line(&self, depth: usize, out: &mut String) {
        let _ = write!(
            out,
            "{:indent$}\"{}\"",
            "",
            self.fragment.escape_ascii(),
            indent = depth * 2
        );
        match &self.value {
            None => {}
            Some(None) => out.push_str(" => null"),
            Some(Some(v)) => {
                let _ = write!(out, " => {}", v.digest().short());
            }
        }
        if let Some(cached) = self.digest.get() {
            let _ = write!(out, " #{}", cached.short());
        }
        out.push('\n');
    }
}

/// Length of the common prefix of two byte slices
fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
impl<V> Node<V> {
    /// Check the structural invariants of the subtree and count its keys
    pub(crate) fn check(&self, is_root: bool) -> std::result::Result<usize, String> {
        if is_root && !self.fragment.is_empty() {
            return Err("root has a fragment".into());
        }
        if !is_root {
            if self.fragment.is_empty() {
                return Err("non-root node with empty fragment".into());
            }
            if self.value.is_none() && self.children.len() < 2 {
                return Err(format!(
                    "redundant node {:?} with {} children",
                    self.fragment.escape_ascii().to_string(),
                    self.children.len()
                ));
            }
        }
        let mut keys = usize::from(self.value.is_some());
        for (byte, child) in &self.children {
            if child.fragment.first() != Some(byte) {
                return Err(format!("child filed under {byte} has wrong first byte"));
            }
            keys += child.check(false)?;
        }
        Ok(keys)
    }
}
