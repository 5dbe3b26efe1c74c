//! Infrastructure layer for the preference store.
//!
//! Contains the OS-facing adapters: the key/value persistence collaborator
//! and the TOML application configuration file.
//!
//! **Dependency rule**: this layer may depend on `campus_core`, but MUST NOT
//! be imported by the domain layer.  The application layer only sees the
//! [`storage::KeyValueStorage`] trait.

pub mod config;
pub mod storage;
