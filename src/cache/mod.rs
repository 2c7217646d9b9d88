//! Snapshot persistence for the index.
//!
//! The cacheable state of an index is minimal: the definitions map, the
//! reference mapping, and the two completeness flags. Scope groups, the
//! global view, and the prefix trie are derived and rebuilt on decode.
//! Payloads are opaque bytes with a schema version inside; any payload
//! that fails to parse or carries another version is a cache miss, never a
//! fatal condition.

pub(crate) mod codec;
mod error;

pub use codec::CACHE_SCHEMA_VERSION;
pub use error::CacheError;
