//! Theme persistence
//!
//! The theme mode lives under [`THEME_MODE_KEY`] and each mode's accent
//! under `theme_color_<mode>`. Values are the lowercase names returned by
//! [`ThemeMode::name`] and [`AccentColor::name`].

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};

use super::{AccentColor, ThemeMode, ThemeState};
use crate::error::Result;

pub const THEME_MODE_KEY: &str = "theme_mode";

/// Key holding the accent remembered for `mode`.
pub fn accent_key(mode: ThemeMode) -> String {
    format!("theme_color_{}", mode.name())
}

/// String key-value store provided by the host
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Flush pending writes.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory store, for hosts without persistent storage and for tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl ThemeState {
    /// Read the theme from `store`.
    ///
    /// Missing or unrecognised values fall back to the defaults: LED mode
    /// and each mode's default accent.
    pub fn load<P: PreferenceStore + ?Sized>(store: &P) -> Self {
        let mode = match store.get(THEME_MODE_KEY).map(|name| name.parse::<ThemeMode>()) {
            Some(Ok(mode)) => mode,
            Some(Err(_)) => {
                crate::warn!("unknown theme mode preference, using led");
                ThemeMode::Led
            }
            None => ThemeMode::Led,
        };
        let mut theme = ThemeState::new(mode);
        for mode in ThemeMode::ALL {
            let Some(name) = store.get(&accent_key(mode)) else {
                continue;
            };
            match name.parse::<AccentColor>() {
                Ok(accent) => theme.set_accent_for(mode, accent),
                Err(_) => crate::warn!("unknown accent preference for {}", mode),
            }
        }
        crate::debug!("loaded theme {} / {}", theme.mode(), theme.accent());
        theme
    }

    /// Write the mode and every mode's accent, then commit.
    pub fn save<P: PreferenceStore + ?Sized>(&self, store: &mut P) -> Result<()> {
        store.set(THEME_MODE_KEY, self.mode().name())?;
        for mode in ThemeMode::ALL {
            store.set(&accent_key(mode), self.accent_for(mode).name())?;
        }
        store.commit()
    }
}
