//! Versioned JSON envelope for the persisted preference record.
//!
//! The record is stored under [`STORAGE_KEY`] as UTF-8 JSON:
//!
//! ```json
//! {"state":{"darkMode":true,"notificationsEnabled":false,"language":"en"},"version":0}
//! ```
//!
//! The envelope mirrors what the web client writes under the same key, so both
//! clients can rehydrate from one another's records.  Missing fields inside
//! `state` take their defaults; a missing `version` is read as `0`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::settings::SettingsState;
use crate::error::SettingsError;

/// Fixed key the preference record is stored under.
pub const STORAGE_KEY: &str = "settings-storage";

/// Highest record version this build understands.
pub const SCHEMA_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecord {
    #[serde(default)]
    state: SettingsState,
    #[serde(default)]
    version: u32,
}

/// Serialises `state` into the bytes stored under [`STORAGE_KEY`].
///
/// # Errors
///
/// Returns [`SettingsError::Codec`] if JSON encoding fails.
pub fn encode_record(state: &SettingsState) -> Result<Vec<u8>, SettingsError> {
    let record = PersistedRecord {
        state: *state,
        version: SCHEMA_VERSION,
    };
    Ok(serde_json::to_vec(&record)?)
}

/// Parses a persisted record.
///
/// Returns `Ok(None)` when the record was written by a newer schema version,
/// which callers treat the same as an absent record.
///
/// # Errors
///
/// Returns [`SettingsError::Codec`] if the bytes are not a valid record, for
/// example an unknown locale code or truncated JSON.
pub fn decode_record(bytes: &[u8]) -> Result<Option<SettingsState>, SettingsError> {
    let record: PersistedRecord = serde_json::from_slice(bytes)?;
    if record.version > SCHEMA_VERSION {
        debug!(
            version = record.version,
            supported = SCHEMA_VERSION,
            "ignoring settings record from a newer schema"
        );
        return Ok(None);
    }
    Ok(Some(record.state))
}
