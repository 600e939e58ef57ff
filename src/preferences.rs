//! User preferences
//!
//! The colour theme and the email remembered by the login form. Both outlive
//! the session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::storage::{KeyValueStore, keys};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

#[derive(Clone)]
pub struct Preferences {
    store: KeyValueStore,
}

impl Preferences {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Stored theme; dark when unset or unreadable.
    pub fn theme(&self) -> Theme {
        self.store
            .get_text(keys::THEME)
            .and_then(|theme| theme.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> bool {
        self.store.set(keys::THEME, &theme)
    }

    /// Switches between dark and light and returns the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let theme = self.theme().toggled();
        self.set_theme(theme);
        theme
    }

    pub fn saved_email(&self) -> Option<String> {
        self.store.get_text(keys::SAVED_EMAIL)
    }

    pub fn remember_email(&self, email: &str) -> bool {
        self.store.set(keys::SAVED_EMAIL, email)
    }

    pub fn forget_email(&self) {
        self.store.remove(keys::SAVED_EMAIL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_defaults_to_dark_and_toggles() {
        let prefs = Preferences::new(KeyValueStore::in_memory());
        assert_eq!(prefs.theme(), Theme::Dark);

        assert_eq!(prefs.toggle_theme(), Theme::Light);
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn unreadable_theme_falls_back_to_dark() {
        let store = KeyValueStore::in_memory();
        store.set_raw(keys::THEME, "\"sepia\"").unwrap();
        assert_eq!(Preferences::new(store).theme(), Theme::Dark);
    }

    #[test]
    fn reads_bare_strings_left_by_plain_writers() {
        let store = KeyValueStore::in_memory();
        store.set_raw(keys::THEME, "light").unwrap();
        store.set_raw(keys::SAVED_EMAIL, "ada@demo.com").unwrap();

        let prefs = Preferences::new(store);
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.saved_email().as_deref(), Some("ada@demo.com"));
        assert_eq!(prefs.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn remembers_and_forgets_email() {
        let prefs = Preferences::new(KeyValueStore::in_memory());
        assert_eq!(prefs.saved_email(), None);

        assert!(prefs.remember_email("ada@demo.com"));
        assert_eq!(prefs.saved_email().as_deref(), Some("ada@demo.com"));

        prefs.forget_email();
        assert_eq!(prefs.saved_email(), None);
    }
}
