//! Journey commands

use tracing::info;

use crate::config::Config;
use crate::domain::journey::{JourneyGenerator, UserPreferences};
use crate::error::Result;
use crate::storage::{ArtifactStore, JourneyRecord};

/// Parameters for generating a journey through a stored map
#[derive(Debug, Clone, Default)]
pub struct JourneyRequest {
    pub document_id: String,
    pub start_concept: String,
    /// Stored preferences of this user are applied first
    pub user_id: Option<String>,
    /// Applied on top of the stored preferences
    pub overrides: UserPreferences,
}

impl JourneyRequest {
    pub fn new(document_id: impl Into<String>, start_concept: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            start_concept: start_concept.into(),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_overrides(mut self, overrides: UserPreferences) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Effective preferences: the user's stored ones overlaid with the request's
pub fn resolve_preferences(store: &ArtifactStore, request: &JourneyRequest) -> Result<UserPreferences> {
    let mut preferences = match &request.user_id {
        Some(user) => store.preferences_or_default(user)?,
        None => UserPreferences::default(),
    };
    for (key, value) in request.overrides.to_map() {
        preferences.set(&key, value);
    }
    Ok(preferences)
}

/// Generate a journey through a document's stored map and persist it
pub fn create_journey(
    config: &Config,
    store: &ArtifactStore,
    request: &JourneyRequest,
) -> Result<JourneyRecord> {
    let map = store.load_map(&request.document_id)?;
    let preferences = resolve_preferences(store, request)?;

    let journey = JourneyGenerator::new()
        .with_seed(config.journey.seed)
        .generate(Some(&map), &request.start_concept, Some(&preferences));

    let mut record = JourneyRecord::new(&request.document_id, journey);
    if let Some(user) = &request.user_id {
        record = record.with_user(user);
    }
    store.save_journey(&record)?;

    info!(
        journey_id = %record.id,
        document_id = %request.document_id,
        length = record.journey.path.len(),
        "Journey saved"
    );
    Ok(record)
}

/// Stored journey by id
pub fn show_journey(store: &ArtifactStore, journey_id: &str) -> Result<JourneyRecord> {
    store.load_journey(journey_id)
}
