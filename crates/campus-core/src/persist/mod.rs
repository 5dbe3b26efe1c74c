//! On-disk representation of [`SettingsState`](crate::SettingsState).
//!
//! The `record` sub-module owns the storage key, the versioned envelope and
//! the byte-level codec.  Nothing here performs I/O; the bytes are handed to
//! whichever persistence collaborator the application injects.

pub mod record;
