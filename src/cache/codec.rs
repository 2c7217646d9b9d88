//! Snapshot encode/decode.
//!
//! The wire format is a JSON object holding the schema version, the
//! definitions map (in insertion order), the reference mapping, and the two
//! completeness flags. Nothing else is persisted; derived structures are
//! rebuilt from the definitions map on decode. Round-trip fidelity within
//! this format is the contract — byte-stable output across runs is not.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::base::FxIndexMap;
use crate::index::{Completeness, Definition, ReferenceTable, SymbolTable};

use super::error::CacheError;

/// Bump whenever the snapshot layout or its interpretation changes. A
/// mismatch invalidates persisted snapshots so the service rebuilds them
/// from source.
pub const CACHE_SCHEMA_VERSION: u32 = 1;

/// Borrowed view of the persistent fields, serialized in place.
#[derive(Serialize)]
struct SnapshotRef<'a, D> {
    version: u32,
    definitions: &'a FxIndexMap<Arc<str>, D>,
    references: &'a FxHashMap<Arc<str>, FxHashSet<Arc<str>>>,
    static_complete: bool,
    complete: bool,
}

/// Owned counterpart of [`SnapshotRef`], produced by decode. The version
/// tag is handled separately by [`VersionProbe`] before this parse runs.
#[derive(Deserialize)]
struct Snapshot<D> {
    definitions: FxIndexMap<Arc<str>, D>,
    references: FxHashMap<Arc<str>, FxHashSet<Arc<str>>>,
    static_complete: bool,
    complete: bool,
}

/// Just enough of a snapshot to read its version tag.
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

pub(crate) fn encode<D: Definition + Serialize>(
    symbols: &SymbolTable<D>,
    references: &ReferenceTable,
    completeness: Completeness,
) -> Result<Vec<u8>, CacheError> {
    let snapshot = SnapshotRef {
        version: CACHE_SCHEMA_VERSION,
        definitions: symbols.definitions(),
        references: references.all(),
        static_complete: completeness.is_static_complete(),
        complete: completeness.is_complete(),
    };
    let bytes = serde_json::to_vec(&snapshot).map_err(CacheError::Serialize)?;
    debug!(definitions = symbols.len(), bytes = bytes.len(), "encoded index snapshot");
    Ok(bytes)
}

pub(crate) fn decode<D: Definition + DeserializeOwned>(
    bytes: &[u8],
) -> Result<(SymbolTable<D>, ReferenceTable, Completeness), CacheError> {
    // Check the version before parsing the full payload, so a snapshot from
    // another schema reports as a version mismatch rather than as corrupt.
    let probe: VersionProbe = serde_json::from_slice(bytes).map_err(corrupt)?;
    if probe.version != CACHE_SCHEMA_VERSION {
        warn!(
            found = probe.version,
            expected = CACHE_SCHEMA_VERSION,
            "rejecting index snapshot with mismatched schema version"
        );
        return Err(CacheError::SchemaVersion {
            found: probe.version,
            expected: CACHE_SCHEMA_VERSION,
        });
    }

    let snapshot: Snapshot<D> = serde_json::from_slice(bytes).map_err(corrupt)?;
    // An empty FQN is a programming error on the insert path; coming from a
    // payload it is data corruption and must not trip that guard.
    if snapshot.definitions.keys().any(|fqn| fqn.is_empty()) {
        return Err(CacheError::Corrupt {
            reason: "empty FQN key in definitions".into(),
        });
    }

    let symbols = SymbolTable::rebuild(snapshot.definitions);
    let references = ReferenceTable::from_map(snapshot.references);
    let completeness = Completeness::from_flags(snapshot.static_complete, snapshot.complete);
    debug!(
        definitions = symbols.len(),
        references = references.len(),
        "decoded index snapshot"
    );
    Ok((symbols, references, completeness))
}

fn corrupt(err: serde_json::Error) -> CacheError {
    CacheError::Corrupt { reason: err.to_string() }
}
