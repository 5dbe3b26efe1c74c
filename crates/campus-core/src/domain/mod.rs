//! Domain entities for the preference store.
//!
//! Pure data and rules only: no storage, no logging sinks, no listeners.  The
//! application layer in `campus-settings` composes these with persistence.

/// Preference record, locale enum and the pure transition function.
pub mod settings;
