//! Pathweaver Core Library
//!
//! Turns unstructured document text into a knowledge map and generates
//! personalized learning journeys through it:
//! - Knowledge extraction (concepts, relationships, hierarchy, clusters)
//! - Knowledge maps (force-directed layout, sizing, cluster centres)
//! - Learning journeys (pattern-based, hierarchical, associative, default)
//! - JSON artifact storage
//! - Commands used by the CLI
//!
//! The three stages are plain functions over serializable records:
//!
//! ```
//! let knowledge = pathweaver_core::extract_knowledge("A graph has nodes. Every graph has edges.");
//! let map = pathweaver_core::generate_knowledge_map(&knowledge);
//! let journey = pathweaver_core::generate_journey(Some(&map), "graph", None);
//! assert!(journey.path.iter().all(|id| map.contains(id)));
//! ```

pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod nlp;
pub mod random;
pub mod storage;

use std::sync::Arc;

use domain::journey::{Journey, JourneyGenerator, UserPreferences};
use domain::knowledge::{ExtractedKnowledge, KnowledgeExtractor};
use domain::map::{KnowledgeMap, KnowledgeMapBuilder};
use nlp::HeuristicAnnotator;

pub use error::{Error, Result};

/// Extract knowledge from raw text with the built-in annotator and defaults
pub fn extract_knowledge(text: &str) -> ExtractedKnowledge {
    KnowledgeExtractor::new(Arc::new(HeuristicAnnotator::new())).extract(text)
}

/// Build a knowledge map with the default layout
pub fn generate_knowledge_map(knowledge: &ExtractedKnowledge) -> KnowledgeMap {
    KnowledgeMapBuilder::new().build(knowledge)
}

/// Generate a journey with the default content author
pub fn generate_journey(
    map: Option<&KnowledgeMap>,
    start_concept: &str,
    preferences: Option<&UserPreferences>,
) -> Journey {
    JourneyGenerator::new().generate(map, start_concept, preferences)
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::domain::journey::{Journey, JourneyGenerator, JourneyType, Level, UserPreferences};
    pub use crate::domain::knowledge::{
        Concept, ConceptKind, ExtractedKnowledge, KnowledgeExtractor, ProcessedContent,
        Relationship,
    };
    pub use crate::domain::map::{KnowledgeMap, KnowledgeMapBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::nlp::{HeuristicAnnotator, PrecomputedAnnotator, TextAnnotator};
    pub use crate::storage::ArtifactStore;
    pub use crate::{extract_knowledge, generate_journey, generate_knowledge_map};
}
