//! # campus-core
//!
//! Shared foundation of the Campus preference store: the preference record,
//! the closed locale enum, the pure `(old, op) -> new` transition function and
//! the codec for the persisted record.
//!
//! This crate has no OS, storage or UI dependencies.  The reactive store that
//! wires persistence and change notification around it lives in
//! `campus-settings`.
//!
//! - **`domain`** – [`SettingsState`], [`Language`], [`SettingsOp`] and
//!   [`transition`].
//! - **`persist`** – the storage key, the versioned JSON envelope and
//!   [`encode_record`] / [`decode_record`].

pub mod domain;
pub mod error;
pub mod persist;

pub use domain::settings::{transition, Language, SettingsOp, SettingsState};
pub use error::SettingsError;
pub use persist::record::{decode_record, encode_record, SCHEMA_VERSION, STORAGE_KEY};
