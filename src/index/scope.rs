//! Scope grouping of related symbols.
//!
//! Groups FQNs sharing a scope key: the owner portion of a name before the
//! first member-access operator (see [`fqn::scope_key`]). A class and its
//! members land in one group, which is what member enumeration needs. An
//! FQN without a member-access operator forms (or joins) the group keyed by
//! itself.
//!
//! Pure bookkeeping. [`SymbolTable`](super::SymbolTable) is the only caller
//! of [`add`](ScopeDirectory::add) / [`remove`](ScopeDirectory::remove);
//! nothing else mutates a directory.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::base::{FxIndexSet, fqn};

/// Scope-key → ordered set of member FQNs.
#[derive(Clone, Debug, Default)]
pub struct ScopeDirectory {
    groups: FxHashMap<Arc<str>, FxIndexSet<Arc<str>>>,
}

impl ScopeDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an FQN to the group of its scope key.
    pub fn add(&mut self, fqn_name: Arc<str>) {
        let key: Arc<str> = Arc::from(fqn::scope_key(&fqn_name));
        self.groups.entry(key).or_default().insert(fqn_name);
    }

    /// Remove an FQN from the group of its scope key. Empty groups are
    /// pruned so churn does not grow the directory without bound.
    pub fn remove(&mut self, fqn_name: &str) {
        let key = fqn::scope_key(fqn_name);
        if let Some(group) = self.groups.get_mut(key) {
            group.shift_remove(fqn_name);
            if group.is_empty() {
                self.groups.remove(key);
            }
        }
    }

    /// Iterate the members of a scope group in insertion order. Empty if the
    /// key has no group.
    pub fn members(&self, scope_key: &str) -> impl Iterator<Item = &Arc<str>> {
        self.groups.get(scope_key).into_iter().flatten()
    }

    /// Number of non-empty groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
