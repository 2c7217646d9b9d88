//! Cache persistence errors.

use thiserror::Error;

/// Failure while encoding or decoding an index snapshot.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The payload could not be parsed or failed validation. Discard the
    /// cache and rebuild the index from source.
    #[error("cache payload is corrupt: {reason}")]
    Corrupt { reason: String },

    /// The payload was written under a different schema version. Discard
    /// the cache and rebuild the index from source.
    #[error("unsupported cache schema version {found}, expected {expected}")]
    SchemaVersion { found: u32, expected: u32 },

    /// The in-memory state could not be serialized.
    #[error("failed to serialize index snapshot")]
    Serialize(#[source] serde_json::Error),
}

impl CacheError {
    /// Whether the caller should treat this as a cache miss and rebuild
    /// rather than propagate a failure.
    pub fn is_cache_miss(&self) -> bool {
        matches!(
            self,
            CacheError::Corrupt { .. } | CacheError::SchemaVersion { .. }
        )
    }
}
