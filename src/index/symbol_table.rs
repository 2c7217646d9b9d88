//! The canonical symbol table.
//!
//! Owns the FQN → definition map and every view derived from it: the global
//! filter, the scope directory, and the prefix trie. All four are updated
//! together on insert and remove, with one exception — the prefix trie has
//! no delete, so it may retain names whose definition was removed. Every
//! query that consults the trie filters its hits against the live
//! definition map before returning.
//!
//! The definition payload is opaque. The table reads exactly one thing from
//! it, the [`Definition::is_global`] flag; everything else passes through
//! unchanged.

use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::base::{FxIndexMap, FxIndexSet, fqn};

use super::prefix::PrefixSearch;
use super::scope::ScopeDirectory;

/// Contract a definition payload exposes to the index.
///
/// `Clone` is required because queries hand out owned copies; callers
/// typically wrap their payload in `Arc` to keep that cheap.
pub trait Definition: Clone {
    /// Whether this symbol is global (a built-in or root-namespace symbol
    /// that unqualified references may fall back to).
    fn is_global(&self) -> bool;
}

/// FQN → definition map with derived lookup structures.
#[derive(Clone, Debug)]
pub struct SymbolTable<D> {
    definitions: FxIndexMap<Arc<str>, D>,
    /// FQNs whose payload reports `is_global()`. Derived, never mutated on
    /// its own.
    globals: FxIndexSet<Arc<str>>,
    scopes: ScopeDirectory,
    prefix: PrefixSearch,
}

impl<D> Default for SymbolTable<D> {
    fn default() -> Self {
        Self {
            definitions: FxIndexMap::default(),
            globals: FxIndexSet::default(),
            scopes: ScopeDirectory::new(),
            prefix: PrefixSearch::new(),
        }
    }
}

impl<D> SymbolTable<D> {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The definitions map, in insertion order.
    pub fn definitions(&self) -> &FxIndexMap<Arc<str>, D> {
        &self.definitions
    }

    /// Number of stored definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<D: Definition> SymbolTable<D> {
    /// Insert or overwrite a definition. Updates the global view, the scope
    /// directory, and the prefix trie in the same call.
    ///
    /// # Panics
    /// Panics on an empty FQN (see [`PrefixSearch::insert`]).
    pub fn insert(&mut self, fqn_name: Arc<str>, definition: D) {
        // The trie guard panics on an empty name; run it first so a bad
        // call leaves the table untouched.
        self.prefix.insert(fqn_name.clone());
        if definition.is_global() {
            self.globals.insert(fqn_name.clone());
        } else {
            // An overwrite may flip the flag; keep the view exact.
            self.globals.shift_remove(fqn_name.as_ref());
        }
        self.scopes.add(fqn_name.clone());
        self.definitions.insert(fqn_name, definition);
    }

    /// Exact lookup.
    pub fn get(&self, fqn_name: &str) -> Option<&D> {
        self.definitions.get(fqn_name)
    }

    /// Exact lookup, then one fallback hop: retry the trailing segment of
    /// the name. Unqualified call sites resolve to a global symbol this way
    /// when no namespaced match exists; globals are never namespaced
    /// further, so the retry itself never falls back again.
    pub fn get_with_global_fallback(&self, fqn_name: &str) -> Option<&D> {
        self.get(fqn_name).or_else(|| self.get(fqn::last_segment(fqn_name)))
    }

    /// Remove a definition and its entries in the global view and scope
    /// directory. The prefix trie keeps the name; queries filter it out.
    /// Removing an unknown FQN is a no-op.
    pub fn remove(&mut self, fqn_name: &str) -> Option<D> {
        let removed = self.definitions.shift_remove(fqn_name);
        if removed.is_some() {
            self.globals.shift_remove(fqn_name);
            self.scopes.remove(fqn_name);
        }
        removed
    }

    /// All `(fqn, definition)` pairs, in insertion order.
    pub fn all(&self) -> Vec<(Arc<str>, D)> {
        self.definitions
            .iter()
            .map(|(name, def)| (name.clone(), def.clone()))
            .collect()
    }

    /// The global subset, in insertion order.
    pub fn globals(&self) -> Vec<(Arc<str>, D)> {
        self.globals
            .iter()
            .filter_map(|name| self.definitions.get_key_value(name.as_ref()))
            .map(|(name, def)| (name.clone(), def.clone()))
            .collect()
    }

    /// Every definition whose scope key equals `scope_key`, in insertion
    /// order. Empty if the scope has no members.
    pub fn scope_members(&self, scope_key: &str) -> Vec<(Arc<str>, D)> {
        self.scopes
            .members(scope_key)
            .filter_map(|name| self.definitions.get_key_value(name.as_ref()))
            .map(|(name, def)| (name.clone(), def.clone()))
            .collect()
    }

    /// Every definition whose FQN starts with `prefix` (segment-exact, see
    /// [`PrefixSearch`]). An empty prefix returns the whole table directly,
    /// bypassing the trie. Stale trie hits are filtered out here.
    pub fn find_with_prefix(&self, prefix: &str) -> Vec<(Arc<str>, D)> {
        if prefix.is_empty() {
            return self.all();
        }
        self.prefix
            .search_prefix(prefix)
            .into_iter()
            .filter_map(|name| {
                let (name, def) = self.definitions.get_key_value(name.as_ref())?;
                Some((name.clone(), def.clone()))
            })
            .collect()
    }

    /// Rebuild a table from a persisted definitions map. The global view
    /// and scope directory are rebuilt in map order; trie insertion order
    /// is randomized so the sorted order a persisted map often carries
    /// cannot produce a pathological shape. Lookup results do not depend
    /// on that order.
    pub fn rebuild(definitions: FxIndexMap<Arc<str>, D>) -> Self {
        let mut globals = FxIndexSet::default();
        let mut scopes = ScopeDirectory::new();
        for (name, def) in &definitions {
            if def.is_global() {
                globals.insert(name.clone());
            }
            scopes.add(name.clone());
        }

        let mut names: Vec<Arc<str>> = definitions.keys().cloned().collect();
        names.shuffle(&mut rand::rng());
        let mut prefix = PrefixSearch::new();
        for name in names {
            prefix.insert(name);
        }

        Self { definitions, globals, scopes, prefix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Def {
        global: bool,
        kind: &'static str,
    }

    impl Definition for Def {
        fn is_global(&self) -> bool {
            self.global
        }
    }

    fn def(kind: &'static str) -> Def {
        Def { global: false, kind }
    }

    fn global_def(kind: &'static str) -> Def {
        Def { global: true, kind }
    }

    fn names(pairs: &[(Arc<str>, Def)]) -> Vec<String> {
        let mut names: Vec<String> = pairs.iter().map(|(n, _)| n.to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("App\\User"), def("class"));

        assert_eq!(table.get("App\\User"), Some(&def("class")));
        assert_eq!(table.get("App\\Missing"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_overwrite_last_write_wins() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("App\\User"), def("class"));
        table.insert(Arc::from("App\\User"), def("interface"));

        assert_eq!(table.get("App\\User"), Some(&def("interface")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_global_view_tracks_flag() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("strlen"), global_def("function"));
        table.insert(Arc::from("App\\User"), def("class"));

        assert_eq!(names(&table.globals()), ["strlen"]);
    }

    #[test]
    fn test_overwrite_flips_global_view() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("User"), global_def("class"));
        assert_eq!(table.globals().len(), 1);

        table.insert(Arc::from("User"), def("class"));
        assert!(table.globals().is_empty());
    }

    #[test]
    fn test_fallback_single_hop() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("Bar"), global_def("function"));

        assert_eq!(table.get("Foo\\Bar"), None);
        assert_eq!(table.get_with_global_fallback("Foo\\Bar"), Some(&global_def("function")));
    }

    #[test]
    fn test_fallback_does_not_recurse() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("App\\User"), def("class"));
        table.insert(Arc::from("User"), global_def("class"));

        // The trailing segment of "App\User::save" is "save": absent, and
        // the hop does not continue to "User" or the scope key.
        assert_eq!(table.get_with_global_fallback("App\\User::save"), None);
    }

    #[test]
    fn test_fallback_identical_when_present() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("App\\User"), def("class"));

        assert_eq!(table.get("App\\User"), table.get_with_global_fallback("App\\User"));
    }

    #[test]
    fn test_remove_updates_all_views() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("App\\User"), def("class"));
        table.insert(Arc::from("App\\User::save"), def("method"));
        table.remove("App\\User::save");

        assert_eq!(table.get("App\\User::save"), None);
        assert_eq!(names(&table.scope_members("App\\User")), ["App\\User"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("App\\User"), def("class"));
        assert!(table.remove("App\\Missing").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_stale_trie_hits_filtered() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("A\\B"), def("class"));
        table.insert(Arc::from("A\\C"), def("class"));
        table.remove("A\\B");

        assert_eq!(names(&table.find_with_prefix("A\\")), ["A\\C"]);
    }

    #[test]
    fn test_find_with_empty_prefix_returns_all() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("A\\B"), def("class"));
        table.insert(Arc::from("strlen"), global_def("function"));

        assert_eq!(names(&table.find_with_prefix("")), ["A\\B", "strlen"]);
    }

    #[test]
    fn test_scope_members_in_insertion_order() {
        let mut table = SymbolTable::new();
        table.insert(Arc::from("App\\User"), def("class"));
        table.insert(Arc::from("App\\User::save"), def("method"));
        table.insert(Arc::from("App\\User::load"), def("method"));

        let members: Vec<String> = table
            .scope_members("App\\User")
            .into_iter()
            .map(|(n, _)| n.to_string())
            .collect();
        assert_eq!(members, ["App\\User", "App\\User::save", "App\\User::load"]);
    }

    #[test]
    fn test_rebuild_matches_fresh_table() {
        let mut fresh = SymbolTable::new();
        fresh.insert(Arc::from("App\\User"), def("class"));
        fresh.insert(Arc::from("App\\User::save"), def("method"));
        fresh.insert(Arc::from("strlen"), global_def("function"));

        let rebuilt = SymbolTable::rebuild(fresh.definitions().clone());

        assert_eq!(names(&rebuilt.all()), names(&fresh.all()));
        assert_eq!(names(&rebuilt.globals()), names(&fresh.globals()));
        assert_eq!(
            names(&rebuilt.scope_members("App\\User")),
            names(&fresh.scope_members("App\\User"))
        );
        assert_eq!(
            names(&rebuilt.find_with_prefix("App\\")),
            names(&fresh.find_with_prefix("App\\"))
        );
    }
}
