//! User preference state and its pure transition function.
//!
//! [`SettingsState`] is the three-field preference record the client keeps
//! for the signed-in user: theme, notification opt-in and UI locale.
//!
//! # Pure transitions
//!
//! Every change to the record is described by a [`SettingsOp`] and applied by
//! [`transition`], which maps `(old, op)` to the new state without touching
//! storage or listeners.  The store in `campus-settings` wraps this function
//! with persistence and change notification, so the rules below can be tested
//! without any I/O.
//!
//! ```rust
//! use campus_core::{transition, Language, SettingsOp, SettingsState};
//!
//! let state = transition(SettingsState::default(), SettingsOp::SetLanguage(Language::En));
//! assert_eq!(state.language, Language::En);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

// ── Language ──────────────────────────────────────────────────────────────────

/// UI locale preference.
///
/// Closed set: only French and English are representable.  Untyped input
/// (e.g. a command-line argument) goes through [`FromStr`], which rejects any
/// other code with [`SettingsError::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French, the default locale.
    #[default]
    Fr,
    /// English.
    En,
}

impl Language {
    /// Every supported locale, in display order.
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    /// Two-letter locale code as stored on disk (`"fr"` / `"en"`).
    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = SettingsError;

    /// Parses a locale code.  Surrounding whitespace and letter case are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| SettingsError::InvalidArgument {
                field: "language",
                value: s.to_string(),
            })
    }
}

// ── SettingsState ─────────────────────────────────────────────────────────────

/// Snapshot of the user's preferences.
///
/// Field names are serialised in camelCase so the persisted record stays
/// readable by the web client that shares the same storage key.  Fields absent
/// from a persisted record take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsState {
    /// Dark UI theme.
    pub dark_mode: bool,
    /// Push/local notification opt-in.
    pub notifications_enabled: bool,
    /// UI locale.
    pub language: Language,
}

// ── Operations ────────────────────────────────────────────────────────────────

/// A single mutation of [`SettingsState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOp {
    /// Flip `dark_mode`.
    ToggleDarkMode,
    /// Set `dark_mode` to the given value.
    SetDarkMode(bool),
    /// Flip `notifications_enabled`.
    ToggleNotifications,
    /// Set `notifications_enabled` to the given value.
    SetNotificationsEnabled(bool),
    /// Set the UI locale.
    SetLanguage(Language),
    /// Restore every field to its default.
    Reset,
}

/// Applies `op` to `old` and returns the resulting state.
///
/// Total and side-effect free.  Setting a field to its current value yields an
/// equal state; callers still treat it as a mutation.
pub fn transition(old: SettingsState, op: SettingsOp) -> SettingsState {
    match op {
        SettingsOp::ToggleDarkMode => SettingsState {
            dark_mode: !old.dark_mode,
            ..old
        },
        SettingsOp::SetDarkMode(value) => SettingsState {
            dark_mode: value,
            ..old
        },
        SettingsOp::ToggleNotifications => SettingsState {
            notifications_enabled: !old.notifications_enabled,
            ..old
        },
        SettingsOp::SetNotificationsEnabled(value) => SettingsState {
            notifications_enabled: value,
            ..old
        },
        SettingsOp::SetLanguage(language) => SettingsState { language, ..old },
        SettingsOp::Reset => SettingsState::default(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_state() -> SettingsState {
        SettingsState {
            dark_mode: true,
            notifications_enabled: true,
            language: Language::En,
        }
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_state_is_light_silent_french() {
        let state = SettingsState::default();
        assert!(!state.dark_mode);
        assert!(!state.notifications_enabled);
        assert_eq!(state.language, Language::Fr);
    }

    // ── Language parsing ──────────────────────────────────────────────────────

    #[test]
    fn test_language_parses_known_codes() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
    }

    #[test]
    fn test_language_parse_ignores_case_and_whitespace() {
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert_eq!("Fr".parse::<Language>().unwrap(), Language::Fr);
    }

    #[test]
    fn test_language_parse_rejects_unknown_code() {
        // Act
        let err = "de".parse::<Language>().unwrap_err();

        // Assert
        match err {
            SettingsError::InvalidArgument { field, value } => {
                assert_eq!(field, "language");
                assert_eq!(value, "de");
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_language_parse_rejects_empty_string() {
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_display_matches_code() {
        for lang in Language::ALL {
            assert_eq!(lang.to_string(), lang.code());
        }
    }

    // ── transition ────────────────────────────────────────────────────────────

    #[test]
    fn test_set_dark_mode_sets_exact_value() {
        for v in [true, false] {
            for start in [SettingsState::default(), custom_state()] {
                let next = transition(start, SettingsOp::SetDarkMode(v));
                assert_eq!(next.dark_mode, v);
                assert_eq!(next.notifications_enabled, start.notifications_enabled);
                assert_eq!(next.language, start.language);
            }
        }
    }

    #[test]
    fn test_toggle_dark_mode_twice_is_identity() {
        for start in [SettingsState::default(), custom_state()] {
            let once = transition(start, SettingsOp::ToggleDarkMode);
            assert_ne!(once.dark_mode, start.dark_mode);
            let twice = transition(once, SettingsOp::ToggleDarkMode);
            assert_eq!(twice, start);
        }
    }

    #[test]
    fn test_toggle_notifications_twice_is_identity() {
        let start = SettingsState::default();
        let once = transition(start, SettingsOp::ToggleNotifications);
        assert!(once.notifications_enabled);
        assert_eq!(transition(once, SettingsOp::ToggleNotifications), start);
    }

    #[test]
    fn test_set_notifications_enabled_leaves_other_fields() {
        let start = custom_state();
        let next = transition(start, SettingsOp::SetNotificationsEnabled(false));
        assert!(!next.notifications_enabled);
        assert!(next.dark_mode);
        assert_eq!(next.language, Language::En);
    }

    #[test]
    fn test_last_language_wins() {
        // Arrange
        let state = SettingsState::default();

        // Act
        let state = transition(state, SettingsOp::SetLanguage(Language::Fr));
        let state = transition(state, SettingsOp::SetLanguage(Language::En));

        // Assert
        assert_eq!(state.language, Language::En);
    }

    #[test]
    fn test_setting_current_value_yields_equal_state() {
        let start = custom_state();
        assert_eq!(transition(start, SettingsOp::SetDarkMode(true)), start);
        assert_eq!(transition(start, SettingsOp::SetLanguage(Language::En)), start);
    }

    #[test]
    fn test_reset_restores_defaults() {
        assert_eq!(
            transition(custom_state(), SettingsOp::Reset),
            SettingsState::default()
        );
    }
}
