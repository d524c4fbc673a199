//! Document manifest records

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::journey::Journey;

/// Processing state of an ingested document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Processing,
    KnowledgeExtracted,
    ExtractionFailed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::KnowledgeExtracted => "knowledge_extracted",
            Self::ExtractionFailed => "extraction_failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "processing" => Some(Self::Processing),
            "knowledge_extracted" => Some(Self::KnowledgeExtracted),
            "extraction_failed" => Some(Self::ExtractionFailed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Processing)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document known to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    /// Where the text came from, usually a file path
    pub source: String,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentRecord {
    /// A new record in the `processing` state
    pub fn new(source: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            status: DocumentStatus::Processing,
            created_at: now,
            updated_at: now,
            error: None,
        }
    }

    pub fn mark_extracted(&mut self) {
        self.status = DocumentStatus::KnowledgeExtracted;
        self.error = None;
        self.updated_at = Utc::now();
    }

    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = DocumentStatus::ExtractionFailed;
        self.error = Some(error.into());
        self.updated_at = Utc::now();
    }
}

/// A persisted journey with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyRecord {
    pub id: String,
    pub document_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub journey: Journey,
}

impl JourneyRecord {
    pub fn new(document_id: impl Into<String>, journey: Journey) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            document_id: document_id.into(),
            user_id: None,
            created_at: Utc::now(),
            journey,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        let mut record = DocumentRecord::new("notes.txt");
        assert_eq!(record.status, DocumentStatus::Processing);
        assert!(!record.status.is_terminal());

        record.mark_failed("annotator unavailable");
        assert_eq!(record.status, DocumentStatus::ExtractionFailed);
        assert_eq!(record.error.as_deref(), Some("annotator unavailable"));

        record.mark_extracted();
        assert_eq!(record.status, DocumentStatus::KnowledgeExtracted);
        assert!(record.error.is_none());
        assert!(record.updated_at >= record.created_at);
    }

    #[test]
    fn test_status_strings() {
        let json = serde_json::to_value(DocumentStatus::KnowledgeExtracted).unwrap();
        assert_eq!(json, "knowledge_extracted");
        assert_eq!(
            DocumentStatus::parse("extraction_failed"),
            Some(DocumentStatus::ExtractionFailed)
        );
        assert_eq!(DocumentStatus::parse("done"), None);
    }

    #[test]
    fn test_journey_record_flattens_journey() {
        let record = JourneyRecord::new("doc-1", Journey::empty("graph")).with_user("ada");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["document_id"], "doc-1");
        assert_eq!(json["user_id"], "ada");
        assert_eq!(json["start_concept"], "graph");
        assert_eq!(json["metadata"]["journey_type"], "default");

        let back: JourneyRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
