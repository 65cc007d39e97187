//! Persistence boundary.
//!
//! The hosting environment provides a key-value store (the browser's local
//! storage in production). The crate only sees the [`Storage`] port, so
//! every persisting component can be tested against [`MemoryStorage`].
//! Malformed or absent values always fall back to documented defaults,
//! never to an error.

use std::collections::HashMap;

use super::rules::Mode;

/// Storage key for the UI theme.
pub const KEY_THEME: &str = "theme";

/// Storage key for the selected game mode.
pub const KEY_GAME_MODE: &str = "gameMode";

/// Storage key for the persisted leaderboard.
pub const KEY_LEADERBOARD: &str = "leaderboard";

/// Key-value storage port.
pub trait Storage {
    /// Read a value, `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: String);
}

/// In-memory storage: the tab-lifetime backend, and the test double.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Dark
    }
}

impl Theme {
    /// Persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a persisted value, falling back to the default on unknown input.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::default(),
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Persisted user settings: theme and game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub theme: Theme,
    pub mode: Mode,
}

impl Settings {
    /// Load settings, substituting defaults for absent or unknown values.
    pub fn load<S: Storage>(storage: &S) -> Self {
        let theme = match storage.get(KEY_THEME) {
            Some(raw) => {
                let theme = Theme::parse_or_default(&raw);
                if theme.as_str() != raw {
                    log::warn!("Unknown persisted theme {:?}, using {}", raw, theme.as_str());
                }
                theme
            }
            None => Theme::default(),
        };

        let mode = match storage.get(KEY_GAME_MODE) {
            Some(raw) => {
                let mode = Mode::parse_or_default(&raw);
                if mode.as_str() != raw {
                    log::warn!("Unknown persisted mode {:?}, using {}", raw, mode.as_str());
                }
                mode
            }
            None => Mode::default(),
        };

        Self { theme, mode }
    }

    /// Persist both settings.
    pub fn save<S: Storage>(&self, storage: &mut S) {
        storage.set(KEY_THEME, self.theme.as_str().to_string());
        storage.set(KEY_GAME_MODE, self.mode.as_str().to_string());
    }

    /// Set and persist the theme.
    pub fn set_theme<S: Storage>(&mut self, theme: Theme, storage: &mut S) {
        self.theme = theme;
        storage.set(KEY_THEME, theme.as_str().to_string());
    }

    /// Flip and persist the theme.
    pub fn toggle_theme<S: Storage>(&mut self, storage: &mut S) -> Theme {
        self.set_theme(self.theme.toggled(), storage);
        self.theme
    }

    /// Set and persist the game mode. Takes effect at the next match start.
    pub fn set_mode<S: Storage>(&mut self, mode: Mode, storage: &mut S) {
        self.mode = mode;
        storage.set(KEY_GAME_MODE, mode.as_str().to_string());
    }
}
