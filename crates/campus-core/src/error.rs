//! Error taxonomy for preference handling.

use thiserror::Error;

/// Errors produced while validating or (de)serialising preferences.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A value outside the field's declared domain, e.g. an unknown locale code.
    #[error("invalid value {value:?} for {field}")]
    InvalidArgument {
        /// Name of the rejected field.
        field: &'static str,
        /// The offending input as received.
        value: String,
    },

    /// The persistence collaborator failed to read or write.
    ///
    /// The store logs and absorbs this; setters never return it.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),

    /// The persisted record could not be encoded or decoded.
    #[error("settings record codec error: {0}")]
    Codec(#[from] serde_json::Error),
}
