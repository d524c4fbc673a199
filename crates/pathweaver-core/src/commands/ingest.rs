//! Document ingestion
//!
//! Reads a document, extracts knowledge, builds the knowledge map and
//! persists all three artifacts under a fresh document id.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::knowledge::{KnowledgeExtractor, ProcessedContent};
use crate::domain::map::{KnowledgeMapBuilder, MapMetadata};
use crate::error::{Error, Result};
use crate::nlp::TextAnnotator;
use crate::storage::{ArtifactStore, DocumentRecord};

/// Summary of one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub document: DocumentRecord,
    pub concepts: usize,
    pub relationships: usize,
    pub clusters: usize,
    pub map: MapMetadata,
}

/// Read a file as processor output
///
/// `.json` files must hold a `ProcessedContent` record; anything else is
/// taken as plain text.
pub fn read_content(path: &Path) -> Result<ProcessedContent> {
    let raw = fs::read_to_string(path)?;
    if !path.extension().is_some_and(|ext| ext == "json") {
        return Ok(ProcessedContent::from_text(raw));
    }

    let value: serde_json::Value = serde_json::from_str(&raw)?;
    if value.get("content").is_none() {
        return Err(Error::InvalidInput(format!(
            "{} has no `content` field",
            path.display()
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Ingest a document file
///
/// The document record is written first in the `processing` state and moves
/// to `knowledge_extracted`, or to `extraction_failed` when the file cannot
/// be read or yields no concepts.
pub fn ingest_file(
    config: &Config,
    store: &ArtifactStore,
    annotator: Arc<dyn TextAnnotator>,
    path: &Path,
) -> Result<IngestReport> {
    let mut document = store.create_document(&path.display().to_string())?;
    info!(document_id = %document.id, source = %document.source, "Ingesting document");

    let content = match read_content(path) {
        Ok(content) => content,
        Err(e) => {
            document.mark_failed(e.to_string());
            store.save_document(&document)?;
            return Err(e);
        }
    };

    let extractor = KnowledgeExtractor::new(annotator)
        .with_config(config.extraction.clone())
        .with_clustering(config.clustering.clone());
    let knowledge = extractor.extract_content(&content);
    store.save_knowledge(&document.id, &knowledge)?;

    let map = KnowledgeMapBuilder::new()
        .with_layout(config.layout.clone())
        .build(&knowledge);
    store.save_map(&document.id, &map)?;

    if knowledge.is_empty() {
        warn!(document_id = %document.id, "No concepts extracted");
        document.mark_failed("no concepts extracted");
    } else {
        document.mark_extracted();
    }
    store.save_document(&document)?;

    Ok(IngestReport {
        concepts: knowledge.concepts.len(),
        relationships: knowledge.relationships.len(),
        clusters: knowledge.clusters.len(),
        map: map.metadata,
        document,
    })
}
