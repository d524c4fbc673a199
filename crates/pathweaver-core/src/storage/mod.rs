//! Storage layer - JSON artifact store
//!
//! Every pipeline output is persisted as a pretty-printed JSON file so later
//! stages can be re-run without repeating earlier ones.
//!
//! # Layout
//!
//! ```text
//! <data_dir>/
//! ├── documents/<document-id>.json     DocumentRecord
//! ├── knowledge/<document-id>.json     ExtractedKnowledge
//! ├── maps/<document-id>.json          KnowledgeMap
//! ├── journeys/<journey-id>.json       JourneyRecord
//! └── preferences/<user-id>.json       UserPreferences
//! ```

mod document;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::StorageConfig;
use crate::domain::journey::UserPreferences;
use crate::domain::knowledge::ExtractedKnowledge;
use crate::domain::map::KnowledgeMap;
use crate::error::{Error, Result};

pub use document::{DocumentRecord, DocumentStatus, JourneyRecord};

const DOCUMENTS: &str = "documents";
const KNOWLEDGE: &str = "knowledge";
const MAPS: &str = "maps";
const JOURNEYS: &str = "journeys";
const PREFERENCES: &str = "preferences";

/// File-backed store for documents and pipeline artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Store rooted at `root`; directories are created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the configured data directory
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let root = config
            .resolved_data_dir()
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Documents

    /// Register a new document in the `processing` state
    pub fn create_document(&self, source: &str) -> Result<DocumentRecord> {
        let record = DocumentRecord::new(source);
        self.save_document(&record)?;
        Ok(record)
    }

    pub fn save_document(&self, record: &DocumentRecord) -> Result<()> {
        let path = self.path(DOCUMENTS, &record.id)?;
        write_json(&path, record)
    }

    pub fn load_document(&self, id: &str) -> Result<DocumentRecord> {
        read_json(&self.path(DOCUMENTS, id)?, || {
            Error::DocumentNotFound(id.to_string())
        })
    }

    /// All documents, oldest first
    pub fn list_documents(&self) -> Result<Vec<DocumentRecord>> {
        let dir = self.root.join(DOCUMENTS);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let contents = fs::read_to_string(&path)?;
                documents.push(serde_json::from_str::<DocumentRecord>(&contents)?);
            }
        }
        documents.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(documents)
    }

    // Pipeline artifacts

    pub fn save_knowledge(&self, document_id: &str, knowledge: &ExtractedKnowledge) -> Result<()> {
        write_json(&self.path(KNOWLEDGE, document_id)?, knowledge)
    }

    pub fn load_knowledge(&self, document_id: &str) -> Result<ExtractedKnowledge> {
        read_json(&self.path(KNOWLEDGE, document_id)?, || {
            Error::DocumentNotFound(document_id.to_string())
        })
    }

    pub fn save_map(&self, document_id: &str, map: &KnowledgeMap) -> Result<()> {
        write_json(&self.path(MAPS, document_id)?, map)
    }

    pub fn load_map(&self, document_id: &str) -> Result<KnowledgeMap> {
        read_json(&self.path(MAPS, document_id)?, || {
            Error::MapNotFound(document_id.to_string())
        })
    }

    /// Persist a journey under its record id
    pub fn save_journey(&self, record: &JourneyRecord) -> Result<()> {
        write_json(&self.path(JOURNEYS, &record.id)?, record)
    }

    pub fn load_journey(&self, id: &str) -> Result<JourneyRecord> {
        read_json(&self.path(JOURNEYS, id)?, || {
            Error::JourneyNotFound(id.to_string())
        })
    }

    // Preferences

    pub fn save_preferences(&self, user_id: &str, preferences: &UserPreferences) -> Result<()> {
        write_json(&self.path(PREFERENCES, user_id)?, preferences)
    }

    pub fn load_preferences(&self, user_id: &str) -> Result<UserPreferences> {
        read_json(&self.path(PREFERENCES, user_id)?, || {
            Error::PreferencesNotFound(user_id.to_string())
        })
    }

    /// Stored preferences, or empty ones for an unknown user
    pub fn preferences_or_default(&self, user_id: &str) -> Result<UserPreferences> {
        match self.load_preferences(user_id) {
            Err(Error::PreferencesNotFound(_)) => Ok(UserPreferences::default()),
            other => other,
        }
    }

    fn path(&self, kind: &str, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.root.join(kind).join(format!("{id}.json")))
    }
}

/// Ids become file names, so they must not escape their directory
fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
        return Err(Error::InvalidInput(format!("'{id}' is not a valid identifier")));
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents)?;
    debug!(path = %path.display(), "Artifact written");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path, not_found: impl FnOnce() -> Error) -> Result<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journey::{Journey, JourneyType, Level};
    use crate::domain::knowledge::{Concept, ConceptKind};
    use tempfile::TempDir;

    fn store() -> (ArtifactStore, TempDir) {
        let dir = TempDir::new().unwrap();
        (ArtifactStore::new(dir.path()), dir)
    }

    #[test]
    fn test_document_lifecycle() {
        let (store, _dir) = store();
        let mut record = store.create_document("notes.txt").unwrap();
        assert_eq!(store.load_document(&record.id).unwrap(), record);

        record.mark_extracted();
        store.save_document(&record).unwrap();
        let loaded = store.load_document(&record.id).unwrap();
        assert_eq!(loaded.status, DocumentStatus::KnowledgeExtracted);
    }

    #[test]
    fn test_list_documents_oldest_first() {
        let (store, _dir) = store();
        assert!(store.list_documents().unwrap().is_empty());

        let first = store.create_document("a.txt").unwrap();
        let second = store.create_document("b.txt").unwrap();
        let ids: Vec<String> = store
            .list_documents()
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids.len(), 2);
        if first.created_at < second.created_at {
            assert_eq!(ids, vec![first.id, second.id]);
        }
    }

    #[test]
    fn test_knowledge_and_map_round_trip() {
        let (store, dir) = store();
        let knowledge = ExtractedKnowledge {
            concepts: vec![Concept::new("graph", ConceptKind::KeyTerm).with_importance(0.4)],
            ..Default::default()
        };
        store.save_knowledge("doc-1", &knowledge).unwrap();
        assert_eq!(store.load_knowledge("doc-1").unwrap(), knowledge);

        let map = KnowledgeMap::default();
        store.save_map("doc-1", &map).unwrap();
        assert_eq!(store.load_map("doc-1").unwrap(), map);

        let written = fs::read_to_string(dir.path().join("maps/doc-1.json")).unwrap();
        assert!(written.contains('\n'), "artifacts are pretty printed");
    }

    #[test]
    fn test_missing_artifacts_map_to_lookup_errors() {
        let (store, _dir) = store();
        assert!(matches!(store.load_document("x"), Err(Error::DocumentNotFound(_))));
        assert!(matches!(store.load_knowledge("x"), Err(Error::DocumentNotFound(_))));
        assert!(matches!(store.load_map("x"), Err(Error::MapNotFound(_))));
        assert!(matches!(store.load_journey("x"), Err(Error::JourneyNotFound(_))));
        assert!(matches!(store.load_preferences("x"), Err(Error::PreferencesNotFound(_))));
    }

    #[test]
    fn test_journey_saved_under_fresh_id() {
        let (store, _dir) = store();
        let a = JourneyRecord::new("doc-1", Journey::empty("graph"));
        let b = JourneyRecord::new("doc-1", Journey::empty("graph"));
        assert_ne!(a.id, b.id);

        store.save_journey(&a).unwrap();
        assert_eq!(store.load_journey(&a.id).unwrap(), a);
    }

    #[test]
    fn test_preferences_round_trip() {
        let (store, _dir) = store();
        assert!(store.preferences_or_default("ada").unwrap().is_empty());

        let prefs = UserPreferences::new()
            .with_journey_type(JourneyType::Associative)
            .with_pattern_seeking(Level::Low);
        store.save_preferences("ada", &prefs).unwrap();
        assert_eq!(store.load_preferences("ada").unwrap(), prefs);
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let (store, _dir) = store();
        for id in ["", "..", "../etc", "a/b", "a\\b"] {
            assert!(matches!(store.load_map(id), Err(Error::InvalidInput(_))), "{id}");
        }
    }
}
