//! # cairn-base
//!
//! Core symbol index for source-code intelligence services.
//!
//! This crate is the queryable record of every symbol declared across a
//! project and its dependencies, plus every location that references each
//! symbol. Consumers (go-to-definition, hover, find-references, completion)
//! query it; a static-analysis collaborator populates it file by file.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! cache   → snapshot codec (persist definitions/references/completeness)
//!   ↓
//! index   → the index itself: symbol table, scopes, prefix trie,
//!           references, completeness lifecycle, notifications
//!   ↓
//! base    → primitives (FQN handling, collection aliases)
//! ```
//!
//! Parsing, reference resolution, multi-index aggregation, and the request
//! protocol live in the surrounding service, not here. The service holds an
//! [`Index`] per project or dependency package and drives it through the
//! mutation surface while queries run concurrently.
//!
//! ## Usage
//!
//! ```
//! use cairn::{Definition, Index};
//!
//! #[derive(Clone, serde::Serialize, serde::Deserialize)]
//! struct Symbol {
//!     global: bool,
//! }
//!
//! impl Definition for Symbol {
//!     fn is_global(&self) -> bool {
//!         self.global
//!     }
//! }
//!
//! let index = Index::new();
//! index.set_definition("App\\User", Symbol { global: false });
//! index.set_definition("App\\User::save", Symbol { global: false });
//!
//! assert!(index.definition("App\\User", false).is_some());
//! assert_eq!(index.definitions_for_scope("App\\User").len(), 2);
//! ```

/// Foundation types: FQN handling, collection aliases
pub mod base;

/// Snapshot persistence: encode/decode of the cacheable index state
pub mod cache;

/// The symbol index: tables, lifecycle, notifications, facade
pub mod index;

pub use base::fqn;
pub use cache::{CACHE_SCHEMA_VERSION, CacheError};
pub use index::{
    Completeness, Definition, EventKind, Index, IndexEvent, PrefixSearch, ReferenceTable,
    ScopeDirectory, SubscriptionId, SymbolTable,
};
