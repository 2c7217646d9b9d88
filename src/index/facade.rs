//! The index facade.
//!
//! [`Index`] composes the symbol table, reference table, completeness
//! lifecycle, and notification registry behind one interior-locked type.
//! Collaborators hold a shared reference to it: the static-analysis driver
//! mutates it file by file while query consumers read concurrently.
//!
//! Every mutating operation takes one write-lock critical section covering
//! all derived structures, so readers never observe a torn state (a scope
//! group updated while the definitions map is not, for instance). Queries
//! take a read lock and return owned clones. Notifications fire after the
//! critical section ends, still synchronously within the mutating call;
//! listeners therefore observe fully-updated state and must not mutate the
//! index themselves (see [`IndexEvent`]).

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::{self, CacheError};

use super::completion::Completeness;
use super::events::{EventKind, IndexEvent, ListenerRegistry, SubscriptionId};
use super::references::ReferenceTable;
use super::symbol_table::{Definition, SymbolTable};

/// The symbol index. One per project or dependency package.
pub struct Index<D> {
    state: RwLock<State<D>>,
    listeners: ListenerRegistry,
}

struct State<D> {
    symbols: SymbolTable<D>,
    references: ReferenceTable,
    completeness: Completeness,
}

impl<D> Index<D> {
    /// Create a new empty index in the `Partial` state.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                symbols: SymbolTable::new(),
                references: ReferenceTable::new(),
                completeness: Completeness::default(),
            }),
            listeners: ListenerRegistry::default(),
        }
    }

    /// Number of stored definitions.
    pub fn len(&self) -> usize {
        self.state.read().symbols.len()
    }

    /// Check if the index holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.state.read().symbols.is_empty()
    }

    /// Whether static analysis has finished populating this index.
    pub fn is_static_complete(&self) -> bool {
        self.state.read().completeness.is_static_complete()
    }

    /// Whether cross-file resolution has also finished.
    pub fn is_complete(&self) -> bool {
        self.state.read().completeness.is_complete()
    }

    /// Register a listener for one notification kind. Listeners for a kind
    /// run in registration order.
    pub fn subscribe(
        &self,
        kind: EventKind,
        listener: impl Fn(&IndexEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(kind, listener)
    }

    /// Remove a listener. Returns whether the handle was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl<D: Definition> Index<D> {
    /// Insert or overwrite a definition, then emit
    /// [`IndexEvent::DefinitionAdded`]. Always succeeds; last write wins.
    ///
    /// # Panics
    /// Panics on an empty FQN — associating a definition with an empty name
    /// is a programming error in the caller.
    pub fn set_definition(&self, fqn: impl Into<Arc<str>>, definition: D) {
        let fqn: Arc<str> = fqn.into();
        {
            let mut state = self.state.write();
            state.symbols.insert(fqn.clone(), definition);
        }
        self.listeners.emit(&IndexEvent::DefinitionAdded { fqn });
    }

    /// Remove a definition and every reference entry recorded for the FQN.
    /// References are dropped even when no definition was stored — the
    /// collaborator records references to dependency symbols it never
    /// defines locally. Removing an unknown FQN is a no-op.
    pub fn remove_definition(&self, fqn: &str) {
        let mut state = self.state.write();
        state.symbols.remove(fqn);
        state.references.remove_all(fqn);
    }

    /// Record that `uri` references `fqn`. Duplicates are rejected.
    pub fn add_reference_uri(&self, fqn: impl Into<Arc<str>>, uri: impl Into<Arc<str>>) {
        self.state.write().references.add_uri(fqn, uri);
    }

    /// Forget that `uri` references `fqn`. No-op if either is unknown.
    pub fn remove_reference_uri(&self, fqn: &str, uri: &str) {
        self.state.write().references.remove_uri(fqn, uri);
    }

    /// Mark static analysis finished. Emits [`IndexEvent::StaticComplete`]
    /// on the first call; later calls are no-ops.
    pub fn mark_static_complete(&self) {
        let advanced = { self.state.write().completeness.advance_static() };
        if advanced {
            self.listeners.emit(&IndexEvent::StaticComplete);
        }
    }

    /// Mark the index fully populated, promoting through the static state
    /// first if that step was skipped. Emits [`IndexEvent::StaticComplete`]
    /// and/or [`IndexEvent::Complete`] for the transitions that actually
    /// occurred, in that order. There is no transition backward.
    pub fn mark_complete(&self) {
        let (newly_static, newly_complete) =
            { self.state.write().completeness.advance_complete() };
        if newly_static {
            self.listeners.emit(&IndexEvent::StaticComplete);
        }
        if newly_complete {
            self.listeners.emit(&IndexEvent::Complete);
        }
    }

    /// Look up a definition by FQN. With `fallback_to_global`, a missing
    /// name is retried once as its trailing segment, which is how
    /// unqualified call sites reach built-in and root-namespace symbols.
    /// Absence is an expected outcome, not an error.
    pub fn definition(&self, fqn: &str, fallback_to_global: bool) -> Option<D> {
        let state = self.state.read();
        let found = if fallback_to_global {
            state.symbols.get_with_global_fallback(fqn)
        } else {
            state.symbols.get(fqn)
        };
        found.cloned()
    }

    /// All definitions, in insertion order.
    pub fn definitions(&self) -> Vec<(Arc<str>, D)> {
        self.state.read().symbols.all()
    }

    /// The global subset of [`definitions`](Index::definitions).
    pub fn global_definitions(&self) -> Vec<(Arc<str>, D)> {
        self.state.read().symbols.globals()
    }

    /// Every definition whose scope key equals `scope_key` — a class and
    /// its members. Empty if none.
    pub fn definitions_for_scope(&self, scope_key: &str) -> Vec<(Arc<str>, D)> {
        self.state.read().symbols.scope_members(scope_key)
    }

    /// Every definition whose FQN starts with `prefix`, matched segment by
    /// segment. An empty prefix returns all definitions.
    pub fn find_with_prefix(&self, prefix: &str) -> Vec<(Arc<str>, D)> {
        self.state.read().symbols.find_with_prefix(prefix)
    }

    /// The URIs referencing `fqn`. Empty if none are recorded.
    pub fn reference_uris(&self, fqn: &str) -> Vec<Arc<str>> {
        self.state.read().references.uris(fqn).cloned().collect()
    }

    /// The full reference mapping. For tests and diagnostics, not hot-path
    /// queries.
    pub fn all_references(&self) -> Vec<(Arc<str>, Vec<Arc<str>>)> {
        self.state
            .read()
            .references
            .all()
            .iter()
            .map(|(fqn, uris)| (fqn.clone(), uris.iter().cloned().collect()))
            .collect()
    }
}

impl<D: Definition + Serialize> Index<D> {
    /// Serialize the persistent fields (definitions, references, the two
    /// completeness flags) into an opaque byte payload. A bulk operation:
    /// run it at startup/shutdown, not while mutation is in flight.
    pub fn encode(&self) -> Result<Vec<u8>, CacheError> {
        let state = self.state.read();
        cache::codec::encode(&state.symbols, &state.references, state.completeness)
    }
}

impl<D: Definition + DeserializeOwned> Index<D> {
    /// Restore an index from a payload produced by [`encode`](Index::encode),
    /// rebuilding the derived structures from the definitions map. Any
    /// malformed or version-mismatched payload yields an error whose
    /// [`is_cache_miss`](CacheError::is_cache_miss) is true: discard the
    /// cache and rebuild from source.
    pub fn decode(bytes: &[u8]) -> Result<Self, CacheError> {
        let (symbols, references, completeness) = cache::codec::decode(bytes)?;
        Ok(Self {
            state: RwLock::new(State { symbols, references, completeness }),
            listeners: ListenerRegistry::default(),
        })
    }
}

impl<D> Default for Index<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for Index<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Index")
            .field("definitions", &state.symbols.len())
            .field("references", &state.references.len())
            .field("completeness", &state.completeness)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Def {
        global: bool,
    }

    impl Definition for Def {
        fn is_global(&self) -> bool {
            self.global
        }
    }

    fn local() -> Def {
        Def { global: false }
    }

    fn global() -> Def {
        Def { global: true }
    }

    #[test]
    fn test_set_and_get() {
        let index = Index::new();
        index.set_definition("App\\User", local());

        assert_eq!(index.definition("App\\User", false), Some(local()));
        assert_eq!(index.definition("App\\User", true), Some(local()));
        assert_eq!(index.definition("App\\Missing", false), None);
    }

    #[test]
    fn test_fallback_reaches_global() {
        let index = Index::new();
        index.set_definition("Bar", global());

        assert_eq!(index.definition("Foo\\Bar", false), None);
        assert_eq!(index.definition("Foo\\Bar", true), Some(global()));
    }

    #[test]
    fn test_fallback_uses_trailing_segment_not_scope_key() {
        let index = Index::new();
        index.set_definition("App\\User", local());
        index.set_definition("User", global());

        // Trailing segment of "App\User::save" is "save" — absent, so the
        // whole lookup misses even though "User" and "App\User" exist.
        assert_eq!(index.definition("App\\User::save", true), None);
    }

    #[test]
    fn test_remove_definition_drops_references() {
        let index = Index::new();
        index.set_definition("App\\User", local());
        index.add_reference_uri("App\\User", "file:///src/a.php");
        index.remove_definition("App\\User");

        assert_eq!(index.definition("App\\User", false), None);
        assert!(index.reference_uris("App\\User").is_empty());
    }

    #[test]
    fn test_remove_drops_references_without_definition() {
        let index: Index<Def> = Index::new();
        index.add_reference_uri("Dep\\Thing", "file:///src/a.php");
        index.remove_definition("Dep\\Thing");

        assert!(index.reference_uris("Dep\\Thing").is_empty());
    }

    #[test]
    fn test_definition_added_event() {
        let index = Index::new();
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        index.subscribe(EventKind::DefinitionAdded, move |event| {
            if let IndexEvent::DefinitionAdded { fqn } = event {
                sink.lock().push(fqn.to_string());
            }
        });

        index.set_definition("App\\User", local());
        index.set_definition("App\\User", local()); // overwrite announces too

        assert_eq!(*seen.lock(), ["App\\User", "App\\User"]);
    }

    #[test]
    fn test_mark_complete_emits_both_events_once() {
        let index: Index<Def> = Index::new();
        let seen: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        index.subscribe(EventKind::StaticComplete, move |_| sink.lock().push("static"));
        let sink = seen.clone();
        index.subscribe(EventKind::Complete, move |_| sink.lock().push("complete"));

        index.mark_complete();
        index.mark_complete();
        index.mark_static_complete();

        assert_eq!(*seen.lock(), ["static", "complete"]);
        assert!(index.is_static_complete());
        assert!(index.is_complete());
    }

    #[test]
    fn test_unsubscribed_listener_not_called() {
        let index: Index<Def> = Index::new();
        let seen: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let id = index.subscribe(EventKind::StaticComplete, move |_| sink.lock().push("gone"));
        assert!(index.unsubscribe(id));

        index.mark_static_complete();
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_debug_shows_counts() {
        let index = Index::new();
        index.set_definition("App\\User", local());
        index.add_reference_uri("App\\User", "file:///src/a.php");

        let output = format!("{index:?}");
        assert!(output.contains("definitions: 1"), "unexpected debug output: {output}");
    }
}
