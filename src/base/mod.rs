//! Foundation types for the cairn index.
//!
//! This module provides fundamental pieces used throughout the crate:
//! - [`fqn`] - Fully-qualified name handling (scope keys, segments)
//! - [`FxIndexMap`], [`FxIndexSet`] - Order-preserving Fx-hashed collections
//!
//! This module has NO dependencies on other cairn modules.

pub mod fqn;

/// An insertion-order-preserving map hashed with FxHasher.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;

/// An insertion-order-preserving set hashed with FxHasher.
pub type FxIndexSet<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;
