//! Prefix search over symbol names.
//!
//! A trie keyed by FQN qualifier segments (see [`fqn::split_segments`]),
//! backing completion queries of the form "all symbols under `App\User::`".
//! Matching is segment-exact: a query walks the trie one segment at a time,
//! so `A\B` reaches only the child stored for segment `B`, never the sibling
//! segment `Build`. Listing every member of a scope is the query this
//! structure serves; ranking and fuzzy matching live elsewhere.
//!
//! There is no delete operation. Removal consistency is handled one level
//! up: [`SymbolTable`](super::SymbolTable) filters stale hits against the
//! live definition map at query time.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::base::fqn;

/// A trie over symbol names, keyed by qualifier segment.
#[derive(Clone, Debug, Default)]
pub struct PrefixSearch {
    root: TrieNode,
    len: usize,
}

#[derive(Clone, Debug, Default)]
struct TrieNode {
    children: FxHashMap<Arc<str>, TrieNode>,
    /// The full name stored at this node, if a name ends here.
    entry: Option<Arc<str>>,
}

impl TrieNode {
    fn collect_into(&self, out: &mut Vec<Arc<str>>) {
        if let Some(entry) = &self.entry {
            out.push(entry.clone());
        }
        for child in self.children.values() {
            child.collect_into(out);
        }
    }
}

impl PrefixSearch {
    /// Create a new empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name. Idempotent: re-inserting an already-present name is a
    /// no-op.
    ///
    /// # Panics
    /// Panics on an empty name. Associating a definition with an empty FQN
    /// is a programming error in the calling collaborator, not a recoverable
    /// condition.
    pub fn insert(&mut self, name: Arc<str>) {
        assert!(!name.is_empty(), "symbol names in the prefix index must be non-empty");

        let mut node = &mut self.root;
        for segment in fqn::split_segments(&name) {
            node = node.children.entry(Arc::from(segment)).or_default();
        }
        if node.entry.is_none() {
            node.entry = Some(name);
            self.len += 1;
        }
    }

    /// All stored names sharing `prefix`, matched segment by segment.
    ///
    /// Runs in time proportional to the segment count of `prefix` plus the
    /// size of the matched subtree. An empty prefix returns every stored
    /// name; the facade never forwards that case here, but standalone users
    /// get the whole-trie enumeration.
    pub fn search_prefix(&self, prefix: &str) -> Vec<Arc<str>> {
        let mut node = &self.root;
        for segment in fqn::split_segments(prefix) {
            match node.children.get(segment) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }
        let mut out = Vec::new();
        node.collect_into(&mut out);
        out
    }

    /// Whether `name` is stored (exact match).
    pub fn contains(&self, name: &str) -> bool {
        let mut node = &self.root;
        for segment in fqn::split_segments(name) {
            match node.children.get(segment) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.entry.is_some()
    }

    /// Number of distinct names stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the trie is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
