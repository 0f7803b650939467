//! Versioned JSON encoding of the whole study state under a single key.

use serde::{Deserialize, Serialize};
use study_core::StudyState;

use crate::repository::StorageError;

/// Key the study state is stored under unless configured otherwise.
pub const DEFAULT_STATE_KEY: &str = "study-progress";

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    state: &'a StudyState,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    state: serde_json::Value,
}

/// Encode the state into the persisted envelope.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_state(state: &StudyState) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(&EnvelopeRef {
        version: SNAPSHOT_VERSION,
        state,
    })
    .map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Decode a persisted envelope and reconcile it with the badge catalog.
///
/// # Errors
///
/// Returns `StorageError::UnsupportedVersion` for unknown versions and
/// `StorageError::Serialization` for malformed bytes.
pub fn decode_state(bytes: &[u8]) -> Result<StudyState, StorageError> {
    let envelope: Envelope =
        serde_json::from_slice(bytes).map_err(|err| StorageError::Serialization(err.to_string()))?;

    if envelope.version != SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: envelope.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let state: StudyState = serde_json::from_value(envelope.state)
        .map_err(|err| StorageError::Serialization(err.to_string()))?;
    Ok(state.reconciled())
}
