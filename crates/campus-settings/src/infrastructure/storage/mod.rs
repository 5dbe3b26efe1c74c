//! Storage infrastructure: the persistence collaborator of the settings store.
//!
//! The store only needs a durable key/value medium addressed by string keys.
//! [`KeyValueStorage`] abstracts it so the store can be backed by:
//!
//! - [`file::FileStorage`] in production, one file per key in a directory.
//! - [`memory::MemoryStorage`] in tests, an in-process map with failure
//!   injection.

use std::path::PathBuf;

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Error type for persistence collaborator operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing storage at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the medium (empty or path-like).
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// The medium refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key/value medium the settings store writes through to.
///
/// The production implementation is [`FileStorage`]; tests use
/// [`MemoryStorage`] or a mock.
pub trait KeyValueStorage {
    /// Returns the bytes stored under `key`, or `None` if nothing was written.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the bytes stored under `key`.
    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}
