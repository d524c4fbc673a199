//! User preference commands

use serde_json::Value;

use crate::domain::journey::UserPreferences;
use crate::error::{Error, Result};
use crate::storage::ArtifactStore;

/// Set one preference key for a user and persist the result
///
/// `value` is parsed as JSON when possible (`3`, `true`, `["a"]`) and stored
/// as a plain string otherwise.
pub fn set_preference(
    store: &ArtifactStore,
    user_id: &str,
    key: &str,
    value: &str,
) -> Result<UserPreferences> {
    if key.trim().is_empty() {
        return Err(Error::InvalidInput("preference key must not be empty".into()));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let mut preferences = store.preferences_or_default(user_id)?;
    preferences.set(key, value);
    store.save_preferences(user_id, &preferences)?;
    Ok(preferences)
}

pub fn show_preferences(store: &ArtifactStore, user_id: &str) -> Result<UserPreferences> {
    store.load_preferences(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journey::Level;
    use tempfile::TempDir;

    #[test]
    fn test_set_preference_parses_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());

        set_preference(&store, "ada", "hierarchical_preference", "high").unwrap();
        let prefs = set_preference(&store, "ada", "daily_minutes", "30").unwrap();

        assert_eq!(prefs.hierarchical_preference, Some(Level::High));
        assert_eq!(prefs.extra["daily_minutes"], 30);
        assert_eq!(show_preferences(&store, "ada").unwrap(), prefs);
    }

    #[test]
    fn test_invalid_level_is_kept_as_extra() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());

        let prefs = set_preference(&store, "ada", "pattern_seeking_level", "extreme").unwrap();
        assert_eq!(prefs.pattern_seeking_level, None);
        assert_eq!(prefs.extra["pattern_seeking_level"], "extreme");
    }

    #[test]
    fn test_empty_key_rejected() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        assert!(matches!(
            set_preference(&store, "ada", " ", "x"),
            Err(Error::InvalidInput(_))
        ));
    }
}
