use crate::domain::error::Result;
use crate::domain::view_preferences::{ViewPreferences, VIEW_PREFERENCES_KEY};
use crate::infrastructure::storage::KeyValueStore;
use tracing::warn;

/// Reads the stored preferences. Missing, unreadable or corrupt values yield the defaults.
pub fn load_preferences(store: &dyn KeyValueStore) -> ViewPreferences {
    let raw = match store.get(VIEW_PREFERENCES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ViewPreferences::default(),
        Err(err) => {
            warn!(error = %err, "Failed to read view preferences, using defaults");
            return ViewPreferences::default();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(error = %err, "Ignoring corrupt view preferences");
        ViewPreferences::default()
    })
}

pub fn save_preferences(store: &dyn KeyValueStore, preferences: &ViewPreferences) -> Result<()> {
    let raw = serde_json::to_string(preferences)?;
    store.set(VIEW_PREFERENCES_KEY, &raw)
}

pub fn clear_preferences(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(VIEW_PREFERENCES_KEY)
}
