use std::sync::Arc;

use super::{KeyValueStore, load_json, save_best_effort};

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme_light";

/// Persisted light/dark palette choice; dark unless the user switched.
pub struct ThemePreference {
    /// `true` selects the light palette.
    light: bool,
    /// Backend written on every mutation.
    store: Arc<dyn KeyValueStore>,
}

impl ThemePreference {
    /// Load the preference, defaulting to dark on missing or malformed data.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let light: bool = load_json(store.as_ref(), THEME_KEY);
        Self { light, store }
    }

    /// Whether the light palette is selected.
    #[must_use]
    pub const fn is_light(&self) -> bool {
        self.light
    }

    /// What: Flip between light and dark and persist the new value.
    ///
    /// Output:
    /// - The new `is_light` value.
    pub fn toggle(&mut self) -> bool {
        self.light = !self.light;
        save_best_effort(self.store.as_ref(), THEME_KEY, &self.light);
        self.light
    }
}
