//! Reference tracking: which locations mention a symbol.
//!
//! Maps an FQN to the set of URIs referencing it. Set semantics throughout:
//! re-adding an already-known URI is rejected, removing an unknown one is a
//! silent no-op. Entries whose URI set becomes empty are pruned.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

/// FQN → set of referencing URIs.
#[derive(Clone, Debug, Default)]
pub struct ReferenceTable {
    refs: FxHashMap<Arc<str>, FxHashSet<Arc<str>>>,
}

impl ReferenceTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a table from a persisted mapping, dropping empty sets.
    pub fn from_map(map: FxHashMap<Arc<str>, FxHashSet<Arc<str>>>) -> Self {
        let refs = map.into_iter().filter(|(_, uris)| !uris.is_empty()).collect();
        Self { refs }
    }

    /// Record that `uri` references `fqn`. Duplicates are rejected.
    pub fn add_uri(&mut self, fqn: impl Into<Arc<str>>, uri: impl Into<Arc<str>>) {
        self.refs.entry(fqn.into()).or_default().insert(uri.into());
    }

    /// Forget that `uri` references `fqn`. No-op if either is unknown.
    pub fn remove_uri(&mut self, fqn: &str, uri: &str) {
        if let Some(uris) = self.refs.get_mut(fqn) {
            uris.remove(uri);
            if uris.is_empty() {
                self.refs.remove(fqn);
            }
        }
    }

    /// Drop every reference recorded for `fqn`.
    pub fn remove_all(&mut self, fqn: &str) {
        self.refs.remove(fqn);
    }

    /// Iterate the URIs referencing `fqn`. Empty if none are recorded.
    pub fn uris(&self, fqn: &str) -> impl Iterator<Item = &Arc<str>> {
        self.refs.get(fqn).into_iter().flatten()
    }

    /// The full mapping. Intended for diagnostics and persistence, not
    /// hot-path queries.
    pub fn all(&self) -> &FxHashMap<Arc<str>, FxHashSet<Arc<str>>> {
        &self.refs
    }

    /// Number of FQNs with at least one recorded reference.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}
