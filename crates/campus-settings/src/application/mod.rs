//! Application layer of the preference store.
//!
//! - **`settings_store`** – the reactive store: setters, toggles, write-through
//!   persistence and change notification around the pure
//!   [`campus_core::transition`] function.
//! - **`subscribers`** – the ordered listener registry and the
//!   [`subscribers::Subscription`] handle returned to callers.
//!
//! This layer depends on the storage *trait* only; the concrete adapters live
//! in `infrastructure`.

pub mod settings_store;
pub mod subscribers;

pub use settings_store::SettingsStore;
pub use subscribers::Subscription;
