//! Persisted display preferences (language and theme).

use serde::{Deserialize, Serialize};

use nour_core::{Locale, Theme};

use crate::error::StoreError;
use crate::store::{PersistedStore, StoreOp, keys};

/// Language and color scheme, shared by the portal and the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub locale: Locale,
    pub theme: Theme,
}

impl Preferences {
    /// Read preferences, falling back to the defaults for missing or
    /// unrecognized values.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be read.
    pub fn load(store: &dyn PersistedStore) -> Result<Self, StoreError> {
        let locale = store
            .get(keys::LANGUAGE)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();
        let theme = store
            .get(keys::THEME)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();

        Ok(Self { locale, theme })
    }

    /// Persist both preferences in one batch.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    pub fn save(self, store: &dyn PersistedStore) -> Result<(), StoreError> {
        store.apply(vec![
            StoreOp::Set(keys::LANGUAGE, self.locale.as_str().to_string()),
            StoreOp::Set(keys::THEME, self.theme.as_str().to_string()),
        ])
    }

    /// Whether text should flow right-to-left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self.locale, Locale::Ar)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_defaults_when_empty() {
        let store = MemoryStore::new();
        let prefs = Preferences::load(&store).unwrap();

        assert_eq!(prefs, Preferences::default());
        assert!(prefs.is_rtl());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        Preferences {
            locale: Locale::En,
            theme: Theme::Dark,
        }
        .save(&store)
        .unwrap();

        assert_eq!(store.get(keys::LANGUAGE).unwrap().as_deref(), Some("en"));
        let prefs = Preferences::load(&store).unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert!(!prefs.is_rtl());
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let store = MemoryStore::with_entries([(keys::LANGUAGE, "fr"), (keys::THEME, "sepia")]);
        assert_eq!(Preferences::load(&store).unwrap(), Preferences::default());
    }
}
