//! The symbol index.
//!
//! This module holds the index data structure itself and everything it
//! composes:
//!
//! - [`SymbolTable`] - canonical FQN → definition map with exact and
//!   global-fallback lookup
//! - [`ScopeDirectory`] - symbols grouped by owner (class and its members)
//! - [`PrefixSearch`] - segment-keyed trie backing completion queries
//! - [`ReferenceTable`] - FQN → referencing URIs
//! - [`Completeness`] - the partial / static-complete / complete lifecycle
//! - [`IndexEvent`] - synchronous change notifications
//! - [`Index`] - the facade collaborators hold
//!
//! The components are public and usable standalone, but the expected entry
//! point is [`Index`].

mod completion;
mod events;
mod facade;
mod prefix;
mod references;
mod scope;
mod symbol_table;

pub use completion::Completeness;
pub use events::{EventKind, IndexEvent, SubscriptionId};
pub use facade::Index;
pub use prefix::PrefixSearch;
pub use references::ReferenceTable;
pub use scope::ScopeDirectory;
pub use symbol_table::{Definition, SymbolTable};
