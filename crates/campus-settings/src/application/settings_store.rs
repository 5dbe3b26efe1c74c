//! SettingsStore: the single source of truth for user preferences.
//!
//! The store owns the in-memory [`SettingsState`], writes it through to the
//! injected [`KeyValueStorage`] after every mutation and then notifies the
//! registered listeners.
//!
//! # Mutation pipeline
//!
//! ```text
//! setter ──► transition(old, op) ──► commit ──► persist ──► notify listeners
//!                 (pure)            (memory)   (best effort)  (in order)
//! ```
//!
//! Persistence is best effort: a failed write is logged with `warn!` and the
//! in-memory state stays authoritative for the rest of the process.  Only the
//! next cold start can lose the change.  [`SettingsStore::last_persist_failed`]
//! exposes the degraded state to callers who want to surface it.
//!
//! # Threading
//!
//! The store is single-threaded (`!Send`, `!Sync`): UI handlers call it one at
//! a time on the main context.  Every operation takes `&self`, so a listener
//! holding a reference to the store may read [`SettingsStore::state`] or
//! unsubscribe from inside its callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use campus_core::{
    decode_record, encode_record, transition, Language, SettingsError, SettingsOp,
    SettingsState, STORAGE_KEY,
};
use tracing::{debug, warn};

use super::subscribers::{SubscriberList, Subscription};
use crate::infrastructure::storage::KeyValueStorage;

/// Reactive, persisted preference store.
///
/// Construct exactly one per process with [`SettingsStore::open`] and keep it
/// for the process lifetime; tests open isolated instances over
/// [`MemoryStorage`](crate::infrastructure::storage::MemoryStorage).
pub struct SettingsStore {
    state: Cell<SettingsState>,
    storage: Box<dyn KeyValueStorage>,
    subscribers: Rc<RefCell<SubscriberList>>,
    persist_failed: Cell<bool>,
}

impl SettingsStore {
    /// Opens the store over `storage`, rehydrating the persisted record.
    ///
    /// A missing, unreadable, corrupt or newer-version record yields the
    /// default state.  Never fails.
    pub fn open(storage: impl KeyValueStorage + 'static) -> Self {
        let state = rehydrate(&storage);
        debug!(?state, "settings store opened");
        Self {
            state: Cell::new(state),
            storage: Box::new(storage),
            subscribers: Rc::new(RefCell::new(SubscriberList::new())),
            persist_failed: Cell::new(false),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> SettingsState {
        self.state.get()
    }

    pub fn toggle_dark_mode(&self) {
        self.apply(SettingsOp::ToggleDarkMode);
    }

    pub fn set_dark_mode(&self, value: bool) {
        self.apply(SettingsOp::SetDarkMode(value));
    }

    pub fn toggle_notifications(&self) {
        self.apply(SettingsOp::ToggleNotifications);
    }

    pub fn set_notifications_enabled(&self, value: bool) {
        self.apply(SettingsOp::SetNotificationsEnabled(value));
    }

    pub fn set_language(&self, language: Language) {
        self.apply(SettingsOp::SetLanguage(language));
    }

    /// Sets the locale from an untyped code such as `"en"`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidArgument`] for any code other than
    /// `fr` / `en`.  The state is left unchanged, nothing is persisted and no
    /// listener is called.
    pub fn set_language_code(&self, code: &str) -> Result<(), SettingsError> {
        let language: Language = code.parse()?;
        self.set_language(language);
        Ok(())
    }

    /// Restores every preference to its default.
    pub fn reset(&self) {
        self.apply(SettingsOp::Reset);
    }

    /// Registers `listener`, called synchronously with the new state after
    /// every mutation, after listeners registered earlier.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&SettingsState) + 'static,
    {
        let id = self.subscribers.borrow_mut().insert(Box::new(listener));
        Subscription::new(&self.subscribers, id)
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// `true` when the most recent write-through failed.
    pub fn last_persist_failed(&self) -> bool {
        self.persist_failed.get()
    }

    fn apply(&self, op: SettingsOp) {
        let next = transition(self.state.get(), op);
        self.state.set(next);
        debug!(?op, state = ?next, "settings updated");

        self.persist(&next);
        self.notify(&next);
    }

    fn persist(&self, state: &SettingsState) {
        let result = encode_record(state).and_then(|bytes| {
            self.storage
                .write(STORAGE_KEY, &bytes)
                .map_err(|e| SettingsError::PersistenceFailure(e.to_string()))
        });
        match result {
            Ok(()) => self.persist_failed.set(false),
            Err(e) => {
                warn!(error = %e, key = STORAGE_KEY, "settings not saved; keeping in-memory state");
                self.persist_failed.set(true);
            }
        }
    }

    fn notify(&self, state: &SettingsState) {
        let listeners = self.subscribers.borrow().snapshot();
        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut callback) => (*callback)(state),
                // Only reachable when a listener mutates the store re-entrantly.
                Err(_) => warn!("skipping listener already running"),
            }
        }
    }
}

fn rehydrate(storage: &dyn KeyValueStorage) -> SettingsState {
    let bytes = match storage.read(STORAGE_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return SettingsState::default(),
        Err(e) => {
            let e = SettingsError::PersistenceFailure(e.to_string());
            warn!(error = %e, key = STORAGE_KEY, "could not read settings; using defaults");
            return SettingsState::default();
        }
    };

    match decode_record(&bytes) {
        Ok(Some(state)) => state,
        Ok(None) => SettingsState::default(),
        Err(e) => {
            warn!(error = %e, key = STORAGE_KEY, "discarding unreadable settings record");
            SettingsState::default()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
